//! Info command - show where a repository lives and how to reach it

use clap::Args;
use gt_core::Target;

use super::Session;

/// Show details about a repository
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Repository name, alias or fuzzy pattern (defaults to the current repository)
    repo: Option<String>,
}

impl InfoArgs {
    pub fn execute(&self, session: &Session) -> anyhow::Result<()> {
        let repo = session.repo_or_current(self.repo.as_deref())?;

        println!("Repository: {}", repo.qualified_name());
        println!("  name: {}", repo.name());
        println!("  namespace: {}", repo.namespace());
        println!("  service: {}", repo.service().domain);
        println!("  path: {}", repo.path().display());
        println!("  website: {}", repo.website()?);
        println!("  git url: {}", repo.git_url()?);
        println!("  http url: {}", repo.http_url()?);
        println!();

        let state = match (repo.exists(), repo.valid()) {
            (false, _) => "not cloned",
            (true, false) => "folder exists, not a git repository",
            (true, true) => "cloned",
        };
        println!("  status: {}", state);

        Ok(())
    }
}
