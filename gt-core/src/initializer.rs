//! High level workflows for bringing repositories and scratchpads into
//! existence

use tracing::info;

use crate::target::{Repo, Scratchpad};
use crate::tasks::{
    GitClone, GitInit, GitRemote, NewFolder, Sequence, SetupRemote, Task, TaskContext,
};
use crate::Result;

/// Runs the create/clone workflows with a fixed [`TaskContext`].
///
/// A failed workflow leaves whatever steps completed in place; running it
/// again picks up where it left off.
#[derive(Debug, Clone)]
pub struct Initializer {
    ctx: TaskContext,
}

impl Initializer {
    pub fn new(ctx: TaskContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &TaskContext {
        &self.ctx
    }

    /// Create a new local repository with an `origin` remote, and ensure it
    /// exists on its hosting service
    pub async fn create_repository(&self, repo: &Repo) -> Result<()> {
        info!(repo = %repo, "Creating repository");
        Sequence::new()
            .then(NewFolder)
            .then(GitInit)
            .then(GitRemote::new("origin"))
            .then(SetupRemote)
            .apply_repo(&self.ctx, repo)
            .await
    }

    /// Clone a repository from its hosting service
    pub async fn clone_repository(&self, repo: &Repo) -> Result<()> {
        Sequence::new().then(GitClone).apply_repo(&self.ctx, repo).await
    }

    pub async fn create_scratchpad(&self, scratch: &Scratchpad) -> Result<()> {
        info!(scratchpad = %scratch, "Creating scratchpad");
        Sequence::new()
            .then(NewFolder)
            .apply_scratchpad(&self.ctx, scratch)
            .await
    }
}
