//! Repository initialisation

use async_trait::async_trait;
use tracing::debug;

use super::{Task, TaskContext};
use crate::git::GitRepo;
use crate::target::{Repo, Target};
use crate::Result;

/// Initializes a git repository in the repo's directory. An existing
/// repository is left untouched.
pub struct GitInit;

#[async_trait]
impl Task for GitInit {
    async fn apply_repo(&self, _ctx: &TaskContext, repo: &Repo) -> Result<()> {
        debug!(repo = %repo, "Initializing git repository");
        GitRepo::init(repo.path())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Scratchpad;
    use crate::tasks::fixtures::test_repo;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init() {
        let temp = tempdir().unwrap();
        let repo = test_repo(temp.path());

        GitInit.apply_repo(&TaskContext::default(), &repo).await.unwrap();
        assert!(repo.valid());

        GitInit.apply_repo(&TaskContext::default(), &repo).await.unwrap();
        assert!(repo.valid());
    }

    #[tokio::test]
    async fn test_scratchpad_noop() {
        let temp = tempdir().unwrap();
        let scratch = Scratchpad::new("2021w05", temp.path());

        GitInit
            .apply_scratchpad(&TaskContext::default(), &scratch)
            .await
            .unwrap();
        assert!(!temp.path().join(".git").exists());
    }
}
