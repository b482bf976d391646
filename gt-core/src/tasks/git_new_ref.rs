//! Reference creation at the current `HEAD`

use async_trait::async_trait;
use tracing::debug;

use super::{run_blocking, Task, TaskContext};
use crate::git::GitRepo;
use crate::target::{Repo, Target};
use crate::Result;

/// Creates (or moves) a reference so it points at the current `HEAD` commit
pub struct GitNewRef {
    name: String,
}

impl GitNewRef {
    /// `name` is a full reference name, e.g. `refs/remotes/origin/main`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Task for GitNewRef {
    async fn apply_repo(&self, _ctx: &TaskContext, repo: &Repo) -> Result<()> {
        let path = repo.path().to_path_buf();
        let name = self.name.clone();

        run_blocking(move || {
            let git = GitRepo::open(&path)?;
            let head = git.head_commit()?;

            debug!(reference = %name, commit = %head, "Creating reference");
            git.inner().reference(&name, head, true, "gt: new reference")?;
            Ok(())
        })
        .await
    }
}
