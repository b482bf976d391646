//! Staging and committing files

use std::path::Path;

use async_trait::async_trait;
use git2::{IndexAddOption, Oid, Signature};
use tracing::info;

use super::{run_blocking, Task, TaskContext};
use crate::git::GitRepo;
use crate::target::{Repo, Target};
use crate::Result;

const AUTHOR_NAME: &str = "Git Tool";
const AUTHOR_EMAIL: &str = "contact@sierrasoftworks.com";

/// Stages the files matching a set of pathspecs and commits them
pub struct GitCommit {
    message: String,
    paths: Vec<String>,
}

impl GitCommit {
    pub fn new<I, S>(message: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

fn commit(path: &Path, message: &str, paths: &[String]) -> Result<Oid> {
    let git = GitRepo::open(path)?;
    let inner = git.inner();

    let mut index = inner.index()?;
    index.add_all(paths.iter().map(String::as_str), IndexAddOption::DEFAULT, None)?;
    index.write()?;

    let tree = inner.find_tree(index.write_tree()?)?;
    let signature = Signature::now(AUTHOR_NAME, AUTHOR_EMAIL)?;

    let parent = match inner.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
        Err(e) => return Err(e.into()),
    };
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    Ok(inner.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?)
}

#[async_trait]
impl Task for GitCommit {
    async fn apply_repo(&self, _ctx: &TaskContext, repo: &Repo) -> Result<()> {
        let path = repo.path().to_path_buf();
        let message = self.message.clone();
        let paths = self.paths.clone();

        let oid = run_blocking(move || commit(&path, &message, &paths)).await?;
        info!(repo = %repo, commit = %oid, "Committed changes");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::fixtures::{head, test_repo};
    use crate::tasks::{GitInit, NewFile, NewFolder, Sequence};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_commits() {
        let temp = tempdir().unwrap();
        let repo = test_repo(temp.path());
        let ctx = TaskContext::default();

        Sequence::new()
            .then(NewFolder)
            .then(GitInit)
            .then(NewFile::new("README.md", "# Test"))
            .then(GitCommit::new("Initial Commit", ["README.md"]))
            .apply_repo(&ctx, &repo)
            .await
            .unwrap();

        let first = head(&repo);
        let git = GitRepo::open(repo.path()).unwrap();
        let commit = git.inner().find_commit(first).unwrap();
        assert_eq!(commit.message(), Some("Initial Commit"));
        assert_eq!(commit.author().name(), Some(AUTHOR_NAME));
        assert_eq!(commit.author().email(), Some(AUTHOR_EMAIL));
        assert_eq!(commit.parent_count(), 0);
        assert!(git.is_clean().unwrap());

        Sequence::new()
            .then(NewFile::new("src/main.rs", "fn main() {}"))
            .then(GitCommit::new("Add main", ["src/*.rs"]))
            .apply_repo(&ctx, &repo)
            .await
            .unwrap();

        let second = git.inner().find_commit(head(&repo)).unwrap();
        assert_eq!(second.parent_id(0).unwrap(), first);
        let tree = second.tree().unwrap();
        assert!(tree.get_path(Path::new("src/main.rs")).is_ok());
    }
}
