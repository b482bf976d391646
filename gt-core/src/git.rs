//! Git repository access for repositories managed by Git Tool

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use git2::{Oid, ReferenceType, Repository, StatusOptions};

use crate::{Error, Result};

/// Whether a branch lives locally or is tracking a remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// `refs/heads/<name>`
    Local,
    /// `refs/remotes/<remote>/<name>`
    Remote,
}

/// A branch or remote-tracking reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Full reference name, e.g. `refs/remotes/origin/main`
    pub reference: String,
    /// Short name, e.g. `main` or `origin/main`
    pub short_name: String,
    /// Where the branch lives
    pub kind: BranchKind,
    /// Commit the branch points at
    pub target: Oid,
}

impl BranchRef {
    /// Branch name without any remote prefix
    pub fn bare_name(&self) -> &str {
        match self.kind {
            BranchKind::Local => &self.short_name,
            BranchKind::Remote => self
                .short_name
                .split_once('/')
                .map(|(_, name)| name)
                .unwrap_or(&self.short_name),
        }
    }
}

/// A git repository wrapper providing the operations Git Tool's tasks need
pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl GitRepo {
    /// Open the git repository rooted exactly at `path`
    ///
    /// Unlike discovery this never walks up to a parent repository, so a
    /// repo folder nested inside another checkout is still reported as
    /// uninitialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::NotARepository {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Git(e)
            }
        })?;

        Ok(Self {
            repo,
            root: path.to_path_buf(),
        })
    }

    /// Initialize a repository at `path`, or open it if one already exists
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Ok(existing) = Self::open(path) {
            return Ok(existing);
        }

        let repo = Repository::init(path)?;
        Ok(Self {
            repo,
            root: path.to_path_buf(),
        })
    }

    /// Get the repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the working tree has no staged or unstaged changes to
    /// tracked files
    pub fn is_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }

    /// The commit currently checked out
    pub fn head_commit(&self) -> Result<Oid> {
        let head = self.repo.head()?;
        head.target().ok_or_else(|| {
            Error::Other(format!(
                "HEAD of {} does not point at a commit",
                self.root.display()
            ))
        })
    }

    /// Get the current branch name
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(Error::Git(e)),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            // Detached HEAD
            Ok(None)
        }
    }

    /// All local and remote-tracking branches. Tags, notes and symbolic
    /// references such as `origin/HEAD` are skipped.
    pub fn branches(&self) -> Result<Vec<BranchRef>> {
        let mut branches = Vec::new();

        for reference in self.repo.references()? {
            let reference = reference?;
            if reference.kind() != Some(ReferenceType::Direct) {
                continue;
            }

            let Some(name) = reference.name() else {
                continue;
            };

            let (kind, short_name) = if let Some(short) = name.strip_prefix("refs/heads/") {
                (BranchKind::Local, short)
            } else if let Some(short) = name.strip_prefix("refs/remotes/") {
                (BranchKind::Remote, short)
            } else {
                continue;
            };

            let Some(target) = reference.target() else {
                continue;
            };

            branches.push(BranchRef {
                reference: name.to_string(),
                short_name: short_name.to_string(),
                kind,
                target,
            });
        }

        Ok(branches)
    }

    /// Branch names suitable for completion: every bare branch name plus
    /// the remote-qualified name of each remote-tracking branch
    pub fn branch_names(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for branch in self.branches()? {
            if branch.kind == BranchKind::Remote {
                names.insert(branch.short_name.clone());
            }
            names.insert(branch.bare_name().to_string());
        }

        Ok(names)
    }

    /// Get access to the underlying git2 repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing() {
        let temp = tempdir().unwrap();
        let result = GitRepo::open(temp.path().join("missing"));
        assert!(matches!(result, Err(Error::NotARepository { .. })));
    }

    #[test]
    fn test_open_uninitialized() {
        let temp = tempdir().unwrap();
        let result = GitRepo::open(temp.path());
        assert!(matches!(result, Err(Error::NotARepository { .. })));
    }

    #[test]
    fn test_init_twice() {
        let temp = tempdir().unwrap();
        GitRepo::init(temp.path()).unwrap();
        let repo = GitRepo::init(temp.path()).unwrap();
        assert_eq!(repo.root(), temp.path());
        assert!(temp.path().join(".git").is_dir());
    }

    #[test]
    fn test_empty_repo() {
        let temp = tempdir().unwrap();
        let repo = GitRepo::init(temp.path()).unwrap();
        assert!(repo.is_clean().unwrap());
        assert_eq!(repo.current_branch().unwrap(), None);
        assert!(repo.branches().unwrap().is_empty());
        assert!(repo.head_commit().is_err());
    }

    #[test]
    fn test_bare_name() {
        let remote = BranchRef {
            reference: "refs/remotes/origin/feature/x".to_string(),
            short_name: "origin/feature/x".to_string(),
            kind: BranchKind::Remote,
            target: Oid::zero(),
        };
        assert_eq!(remote.bare_name(), "feature/x");

        let local = BranchRef {
            reference: "refs/heads/feature/x".to_string(),
            short_name: "feature/x".to_string(),
            kind: BranchKind::Local,
            target: Oid::zero(),
        };
        assert_eq!(local.bare_name(), "feature/x");
    }
}
