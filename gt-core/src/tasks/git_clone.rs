//! Cloning repositories from their hosting service

use std::path::Path;

use async_trait::async_trait;
use git2::build::RepoBuilder;
use git2::{AutotagOption, Cred, CredentialType, FetchOptions, RemoteCallbacks, Repository};
use tokio::process::Command;
use tracing::{debug, info};

use super::{run_blocking, Task, TaskContext};
use crate::target::{Repo, Target};
use crate::{Error, Result};

/// Clones the repo from its hosting service, unless its directory already
/// exists
pub struct GitClone;

#[async_trait]
impl Task for GitClone {
    async fn apply_repo(&self, ctx: &TaskContext, repo: &Repo) -> Result<()> {
        if repo.exists() {
            debug!(repo = %repo, "Repository already exists, skipping clone");
            return Ok(());
        }

        let url = if ctx.features.http_transport {
            repo.http_url()?
        } else {
            repo.git_url()?
        };

        if let Some(parent) = repo.path().parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::fs(format!("Unable to create directory {}", parent.display()), e)
            })?;
        }

        info!(
            repo = %repo,
            url = %url,
            native = ctx.features.native_clone,
            "Cloning repository"
        );

        if ctx.features.native_clone {
            clone_with_git(&url, repo.path()).await
        } else {
            let path = repo.path().to_path_buf();
            run_blocking(move || clone_with_library(&url, &path)).await
        }
    }
}

async fn clone_with_git(url: &str, path: &Path) -> Result<()> {
    let output = Command::new("git")
        .arg("clone")
        .arg("--recurse-submodules")
        .arg(url)
        .arg(path)
        .output()
        .await
        .map_err(|e| Error::Command(format!("Failed to run git clone: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Command(format!(
            "git clone {} failed: {}",
            url,
            stderr.trim()
        )));
    }

    Ok(())
}

fn clone_with_library(url: &str, path: &Path) -> Result<()> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username, allowed| {
        if allowed.contains(CredentialType::SSH_KEY) {
            Cred::ssh_key_from_agent(username.unwrap_or("git"))
        } else {
            Cred::default()
        }
    });

    let mut fetch = FetchOptions::new();
    fetch
        .remote_callbacks(callbacks)
        .download_tags(AutotagOption::All);

    let repo = RepoBuilder::new()
        .fetch_options(fetch)
        .clone(url, path)?;

    update_submodules(&repo)
}

fn update_submodules(repo: &Repository) -> Result<()> {
    for mut submodule in repo.submodules()? {
        debug!(submodule = submodule.name().unwrap_or_default(), "Updating submodule");
        submodule.update(true, None)?;

        let nested = submodule.open()?;
        update_submodules(&nested)?;
    }

    Ok(())
}
