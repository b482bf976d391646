//! New command - create a repository locally and on its hosting service

use anyhow::anyhow;
use clap::Args;
use gt_core::Target;

use super::Session;

/// Create a new repository
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Repository name, e.g. `namespace/name` or `gitlab.com/namespace/name`
    repo: String,
}

impl NewArgs {
    pub async fn execute(&self, session: &Session) -> anyhow::Result<()> {
        let repo = session
            .resolver()
            .get_repo(&self.repo)?
            .ok_or_else(|| anyhow!("'{}' is not a valid repository name", self.repo))?;

        session.remote_initializer()?.create_repository(&repo).await?;
        println!("{}", repo.path().display());

        Ok(())
    }
}
