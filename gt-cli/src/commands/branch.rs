//! Branch commands - switch and list branches

use clap::Args;
use gt_core::tasks::{GitCheckout, Task};

use super::Session;

/// Switch a repository to a branch, creating it if necessary
#[derive(Args, Debug)]
pub struct BranchArgs {
    /// Branch name, either bare (`feature`) or remote qualified (`origin/feature`)
    name: String,

    /// Repository to switch (defaults to the current repository)
    #[arg(short, long)]
    repo: Option<String>,

    /// Keep local modifications instead of resetting the working tree
    #[arg(short, long)]
    keep: bool,
}

impl BranchArgs {
    pub async fn execute(&self, session: &Session) -> anyhow::Result<()> {
        let repo = session.repo_or_current(self.repo.as_deref())?;
        let initializer = session.local_initializer();

        GitCheckout::new(&self.name)
            .keep_changes(self.keep)
            .apply_repo(initializer.context(), &repo)
            .await?;

        Ok(())
    }
}

/// List local and remote-tracking branches
#[derive(Args, Debug)]
pub struct BranchesArgs {
    /// Repository name, alias or fuzzy pattern (defaults to the current repository)
    repo: Option<String>,
}

impl BranchesArgs {
    pub fn execute(&self, session: &Session) -> anyhow::Result<()> {
        let repo = session.repo_or_current(self.repo.as_deref())?;

        for branch in session.resolver().get_branches(&repo)? {
            println!("{}", branch);
        }

        Ok(())
    }
}
