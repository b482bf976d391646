//! Task Engine: small reentrant operations applied to repositories and
//! scratchpads, composed into workflows with [`Sequence`].
//!
//! Every task is safe to run again after a partial failure. Tasks which only
//! make sense for repositories are no-ops when applied to a scratchpad.

use async_trait::async_trait;

use crate::config::{Config, Features};
use crate::host::HostRegistry;
use crate::target::{Repo, Scratchpad};
use crate::{Error, Result};

mod git_checkout;
mod git_clone;
mod git_commit;
mod git_init;
mod git_new_ref;
mod git_remote;
mod new_file;
mod new_folder;
mod sequence;
mod setup_remote;

pub use git_checkout::GitCheckout;
pub use git_clone::GitClone;
pub use git_commit::GitCommit;
pub use git_init::GitInit;
pub use git_new_ref::GitNewRef;
pub use git_remote::GitRemote;
pub use new_file::NewFile;
pub use new_folder::NewFolder;
pub use sequence::Sequence;
pub use setup_remote::SetupRemote;

/// Everything a task may consult besides its target
#[derive(Debug, Clone, Default)]
pub struct TaskContext {
    pub features: Features,
    pub hosts: HostRegistry,
}

impl TaskContext {
    pub fn new(features: Features, hosts: HostRegistry) -> Self {
        Self { features, hosts }
    }

    /// Context using a config's feature flags
    pub fn from_config(config: &Config, hosts: HostRegistry) -> Self {
        Self::new(config.features.clone(), hosts)
    }
}

/// An operation which can be applied to a [`Repo`] or [`Scratchpad`]
#[async_trait]
pub trait Task: Send + Sync {
    async fn apply_repo(&self, ctx: &TaskContext, repo: &Repo) -> Result<()>;

    async fn apply_scratchpad(&self, _ctx: &TaskContext, _scratch: &Scratchpad) -> Result<()> {
        Ok(())
    }
}

/// Run blocking git work on tokio's blocking pool
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Other(format!("Background git task failed: {}", e)))?
}
