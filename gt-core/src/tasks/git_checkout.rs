//! Branch checkout, creating local branches from remote-tracking ones

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use git2::build::CheckoutBuilder;
use git2::Oid;
use tracing::{debug, info};

use super::{run_blocking, Task, TaskContext};
use crate::git::{BranchKind, BranchRef, GitRepo};
use crate::target::{Repo, Target};
use crate::{Error, Result};

/// Switches the repository to a branch, creating it when needed.
///
/// `branch` is looked up against local branches first, then against
/// remote-tracking branches by bare name (`feature`) or remote-qualified name
/// (`origin/feature`). A remote match produces a new local branch at the
/// remote's commit; no match at all produces a new branch at `HEAD`.
pub struct GitCheckout {
    branch: String,
    keep: bool,
}

impl GitCheckout {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            keep: false,
        }
    }

    /// Preserve local modifications instead of forcing the working tree to
    /// match the new branch
    pub fn keep_changes(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }
}

/// Index branches by the names a user may refer to them with. Local
/// branches always own their bare name; a remote-tracking branch only claims
/// its bare name when nothing else has.
fn branch_lookup(branches: Vec<BranchRef>) -> HashMap<String, BranchRef> {
    let mut lookup = HashMap::new();

    for branch in branches {
        match branch.kind {
            BranchKind::Local => {
                lookup.insert(branch.short_name.clone(), branch);
            }
            BranchKind::Remote => {
                lookup
                    .entry(branch.bare_name().to_string())
                    .or_insert_with(|| branch.clone());
                lookup.insert(branch.short_name.clone(), branch);
            }
        }
    }

    lookup
}

/// Switch the repository at `path` to `branch`, returning the new `HEAD`
/// commit and whether the branch had to be created
fn checkout(path: &Path, branch: &str, keep: bool) -> Result<(Oid, bool)> {
    let git = GitRepo::open(path)?;

    if !git.is_clean()? {
        return Err(Error::WorkspaceNotClean {
            path: path.to_path_buf(),
        });
    }

    let lookup = branch_lookup(git.branches()?);
    let (target, mut create): (Oid, bool) = match lookup.get(branch) {
        None => (git.head_commit()?, true),
        Some(found) if found.kind == BranchKind::Remote => (found.target, true),
        Some(found) => (found.target, false),
    };

    let reference = format!("refs/heads/{}", branch);
    let inner = git.inner();

    if create && inner.find_reference(&reference).is_ok() {
        create = false;
    }

    if create {
        debug!(branch, commit = %target, "Creating branch");
        let commit = inner.find_commit(target)?;
        inner.branch(branch, &commit, false)?;
    }

    let commit = inner.find_reference(&reference)?.peel_to_commit()?;

    let mut options = CheckoutBuilder::new();
    if keep {
        options.safe();
    } else {
        options.force();
    }

    inner.checkout_tree(commit.as_object(), Some(&mut options))?;
    inner.set_head(&reference)?;

    Ok((commit.id(), create))
}

#[async_trait]
impl Task for GitCheckout {
    async fn apply_repo(&self, _ctx: &TaskContext, repo: &Repo) -> Result<()> {
        let path = repo.path().to_path_buf();
        let branch = self.branch.clone();
        let keep = self.keep;

        let (commit, created) = run_blocking(move || checkout(&path, &branch, keep)).await?;

        info!(
            repo = %repo,
            branch = %self.branch,
            commit = %commit,
            created,
            "Checked out branch"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::fixtures::{current_branch, head, test_repo};
    use crate::tasks::{
        GitCommit, GitInit, GitNewRef, GitRemote, NewFile, NewFolder, Sequence,
    };
    use tempfile::{tempdir, TempDir};

    /// A repo with two commits. `origin/test-branch` and `origin/shared`
    /// point at the first, while the local `shared` branch points at the
    /// second. Returns the first commit.
    async fn setup() -> (TempDir, Repo, Oid) {
        let temp = tempdir().unwrap();
        let repo = test_repo(temp.path());
        let ctx = TaskContext::default();

        Sequence::new()
            .then(NewFolder)
            .then(GitInit)
            .then(GitRemote::new("origin"))
            .then(NewFile::new("README.md", "# Test Repo"))
            .then(GitCommit::new("Initial Commit", ["README.md"]))
            .then(GitNewRef::new("refs/remotes/origin/test-branch"))
            .then(GitNewRef::new("refs/remotes/origin/shared"))
            .apply_repo(&ctx, &repo)
            .await
            .unwrap();

        let first = head(&repo);

        Sequence::new()
            .then(NewFile::new("CHANGELOG.md", "- Things changed"))
            .then(GitCommit::new("Second Commit", ["CHANGELOG.md"]))
            .then(GitNewRef::new("refs/heads/shared"))
            .apply_repo(&ctx, &repo)
            .await
            .unwrap();

        (temp, repo, first)
    }

    async fn checkout(repo: &Repo, branch: &str) -> Result<()> {
        GitCheckout::new(branch)
            .apply_repo(&TaskContext::default(), repo)
            .await
    }

    #[tokio::test]
    async fn test_remote_only_branch() {
        let (_temp, repo, first) = setup().await;

        checkout(&repo, "test-branch").await.unwrap();

        assert_eq!(head(&repo), first);
        assert_eq!(current_branch(&repo), Some("test-branch".to_string()));
        assert!(!repo.path().join("CHANGELOG.md").exists());
    }

    #[tokio::test]
    async fn test_local_branch_wins() {
        let (_temp, repo, first) = setup().await;
        let second = head(&repo);
        assert_ne!(first, second);

        checkout(&repo, "shared").await.unwrap();

        assert_eq!(head(&repo), second);
        assert_eq!(current_branch(&repo), Some("shared".to_string()));
    }

    #[tokio::test]
    async fn test_remote_qualified_name() {
        let (_temp, repo, first) = setup().await;

        checkout(&repo, "origin/shared").await.unwrap();

        assert_eq!(head(&repo), first);
        assert_eq!(current_branch(&repo), Some("origin/shared".to_string()));
    }

    #[tokio::test]
    async fn test_new_branch_at_head() {
        let (_temp, repo, _first) = setup().await;
        let original = head(&repo);

        checkout(&repo, "new-branch").await.unwrap();

        assert_eq!(head(&repo), original);
        assert_eq!(current_branch(&repo), Some("new-branch".to_string()));
    }

    #[tokio::test]
    async fn test_switch_back_and_forth() {
        let (_temp, repo, first) = setup().await;

        checkout(&repo, "test-branch").await.unwrap();
        checkout(&repo, "shared").await.unwrap();
        // The local branch now exists, so this must not try to create it again
        checkout(&repo, "test-branch").await.unwrap();

        assert_eq!(head(&repo), first);
        assert_eq!(current_branch(&repo), Some("test-branch".to_string()));
    }

    #[tokio::test]
    async fn test_dirty_workspace() {
        let (_temp, repo, _first) = setup().await;
        let original = head(&repo);
        let branch = current_branch(&repo);

        std::fs::write(repo.path().join("README.md"), "# Modified").unwrap();

        let result = checkout(&repo, "test-branch").await;
        assert!(matches!(result, Err(Error::WorkspaceNotClean { .. })));

        assert_eq!(head(&repo), original);
        assert_eq!(current_branch(&repo), branch);
        assert_eq!(
            std::fs::read_to_string(repo.path().join("README.md")).unwrap(),
            "# Modified"
        );
    }

    #[tokio::test]
    async fn test_untracked_files_kept() {
        let (_temp, repo, first) = setup().await;
        std::fs::write(repo.path().join("notes.txt"), "scratch").unwrap();

        GitCheckout::new("test-branch")
            .keep_changes(true)
            .apply_repo(&TaskContext::default(), &repo)
            .await
            .unwrap();

        assert_eq!(head(&repo), first);
        assert!(repo.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_missing_repo() {
        let temp = tempdir().unwrap();
        let repo = test_repo(temp.path());

        assert!(matches!(
            checkout(&repo, "main").await,
            Err(Error::NotARepository { .. })
        ));
    }

    #[test]
    fn test_lookup_precedence() {
        let branch = |kind: BranchKind, short: &str, target: Oid| BranchRef {
            reference: match kind {
                BranchKind::Local => format!("refs/heads/{}", short),
                BranchKind::Remote => format!("refs/remotes/{}", short),
            },
            short_name: short.to_string(),
            kind,
            target,
        };
        let local = Oid::from_str("1111111111111111111111111111111111111111").unwrap();
        let remote = Oid::from_str("2222222222222222222222222222222222222222").unwrap();

        // Remote listed first must not shadow the local branch
        let lookup = branch_lookup(vec![
            branch(BranchKind::Remote, "origin/main", remote),
            branch(BranchKind::Local, "main", local),
            branch(BranchKind::Remote, "origin/feature", remote),
        ]);

        assert_eq!(lookup["main"].target, local);
        assert_eq!(lookup["origin/main"].target, remote);
        assert_eq!(lookup["feature"].kind, BranchKind::Remote);
        assert_eq!(lookup.len(), 4);

        // And the other way around
        let lookup = branch_lookup(vec![
            branch(BranchKind::Local, "main", local),
            branch(BranchKind::Remote, "origin/main", remote),
        ]);
        assert_eq!(lookup["main"].target, local);
    }
}
