//! Directory creation for repositories and scratchpads

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::{Task, TaskContext};
use crate::target::{Repo, Scratchpad, Target};
use crate::{Error, Result};

/// Creates the target's directory, along with any missing parents
pub struct NewFolder;

async fn create(path: &Path) -> Result<()> {
    debug!(path = %path.display(), "Creating directory");
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| {
            Error::fs(format!("Unable to create directory {}", path.display()), e)
        })
}

#[async_trait]
impl Task for NewFolder {
    async fn apply_repo(&self, _ctx: &TaskContext, repo: &Repo) -> Result<()> {
        create(repo.path()).await
    }

    async fn apply_scratchpad(&self, _ctx: &TaskContext, scratch: &Scratchpad) -> Result<()> {
        create(scratch.path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::fixtures::test_repo;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_repo_folder() {
        let temp = tempdir().unwrap();
        let repo = test_repo(temp.path());
        assert!(!repo.exists());

        NewFolder.apply_repo(&TaskContext::default(), &repo).await.unwrap();
        assert!(repo.exists());

        // Already present
        NewFolder.apply_repo(&TaskContext::default(), &repo).await.unwrap();
    }

    #[tokio::test]
    async fn test_scratchpad() {
        let temp = tempdir().unwrap();
        let scratch = Scratchpad::new("2021w05", temp.path().join("scratch").join("2021w05"));

        NewFolder
            .apply_scratchpad(&TaskContext::default(), &scratch)
            .await
            .unwrap();
        assert!(scratch.exists());
    }
}
