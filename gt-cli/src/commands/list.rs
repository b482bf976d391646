//! List command - show repositories in the development directory

use std::path::PathBuf;

use clap::Args;
use gt_core::matcher::matches;
use gt_core::Target;
use serde::Serialize;

use super::Session;

/// List repositories, optionally filtered by a fuzzy pattern
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show repositories whose qualified name fuzzy matches this
    filter: Option<String>,

    /// Show each repository's path as well
    #[arg(short, long)]
    paths: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RepoEntry {
    service: String,
    full_name: String,
    path: PathBuf,
    valid: bool,
}

impl ListArgs {
    pub fn execute(&self, session: &Session) -> anyhow::Result<()> {
        let filter = self.filter.as_deref().unwrap_or_default().to_lowercase();

        let repos: Vec<_> = session
            .resolver()
            .get_repos()?
            .into_iter()
            .filter(|repo| matches(&repo.qualified_name().to_lowercase(), &filter))
            .collect();

        if self.json {
            let entries: Vec<RepoEntry> = repos
                .iter()
                .map(|repo| RepoEntry {
                    service: repo.service().domain.clone(),
                    full_name: repo.full_name().to_string(),
                    path: repo.path().to_path_buf(),
                    valid: repo.valid(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        for repo in repos {
            if self.paths {
                println!("{}\t{}", repo.qualified_name(), repo.path().display());
            } else {
                println!("{}", repo.qualified_name());
            }
        }

        Ok(())
    }
}
