//! Writing files into a target

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{Task, TaskContext};
use crate::target::{Repo, Scratchpad, Target};
use crate::{Error, Result};

/// Writes a file at a path relative to the target, replacing any existing
/// content
pub struct NewFile {
    path: PathBuf,
    content: Vec<u8>,
}

impl NewFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    async fn write(&self, root: &Path) -> Result<()> {
        let path = root.join(&self.path);
        debug!(path = %path.display(), bytes = self.content.len(), "Writing file");

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::fs(format!("Unable to create directory {}", parent.display()), e)
            })?;
        }

        tokio::fs::write(&path, &self.content)
            .await
            .map_err(|e| Error::fs(format!("Unable to write {}", path.display()), e))
    }
}

#[async_trait]
impl Task for NewFile {
    async fn apply_repo(&self, _ctx: &TaskContext, repo: &Repo) -> Result<()> {
        self.write(repo.path()).await
    }

    async fn apply_scratchpad(&self, _ctx: &TaskContext, scratch: &Scratchpad) -> Result<()> {
        self.write(scratch.path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::fixtures::test_repo;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_nested_file() {
        let temp = tempdir().unwrap();
        let repo = test_repo(temp.path());

        NewFile::new("docs/README.md", "# Test")
            .apply_repo(&TaskContext::default(), &repo)
            .await
            .unwrap();

        let content = std::fs::read_to_string(repo.path().join("docs").join("README.md")).unwrap();
        assert_eq!(content, "# Test");
    }

    #[tokio::test]
    async fn test_scratchpad_overwrite() {
        let temp = tempdir().unwrap();
        let scratch = Scratchpad::new("2021w05", temp.path());

        for content in ["first", "second"] {
            NewFile::new("notes.txt", content)
                .apply_scratchpad(&TaskContext::default(), &scratch)
                .await
                .unwrap();
        }

        assert_eq!(std::fs::read_to_string(temp.path().join("notes.txt")).unwrap(), "second");
    }
}
