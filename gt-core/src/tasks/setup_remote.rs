//! Creating the remote repository on its hosting service

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{Task, TaskContext};
use crate::target::Repo;
use crate::Result;

/// Ensures the repo exists on its hosting service, creating it if not.
///
/// Does nothing unless the `create_remote` feature is enabled, and only
/// warns when no host provider handles the repo's service.
pub struct SetupRemote;

#[async_trait]
impl Task for SetupRemote {
    async fn apply_repo(&self, ctx: &TaskContext, repo: &Repo) -> Result<()> {
        if !ctx.features.create_remote {
            debug!(repo = %repo, "Remote creation is disabled");
            return Ok(());
        }

        let Some(host) = ctx.hosts.host_for(repo.service()) else {
            warn!(
                service = %repo.service().domain,
                "Creating remote repositories is not supported for this service"
            );
            return Ok(());
        };

        if host.has_repo(repo).await? {
            debug!(repo = %repo, "Remote repository already exists");
            return Ok(());
        }

        info!(repo = %repo, "Creating remote repository");
        host.create_repo(repo).await
    }
}
