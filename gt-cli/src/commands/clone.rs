//! Clone command

use clap::Args;
use gt_core::Target;

use super::Session;

/// Clone a repository from its hosting service
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Repository name, alias or fuzzy pattern
    repo: String,
}

impl CloneArgs {
    pub async fn execute(&self, session: &Session) -> anyhow::Result<()> {
        let repo = session.resolver().get_best_repo(&self.repo)?;

        session.local_initializer().clone_repository(&repo).await?;
        println!("{}", repo.path().display());

        Ok(())
    }
}
