//! Remote configuration for a repository

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::{run_blocking, Task, TaskContext};
use crate::git::GitRepo;
use crate::target::{Repo, Target};
use crate::{Error, Result};

/// Points a named remote at the repo's URL on its hosting service,
/// replacing any remote already registered under that name
pub struct GitRemote {
    name: String,
}

impl GitRemote {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Task for GitRemote {
    async fn apply_repo(&self, ctx: &TaskContext, repo: &Repo) -> Result<()> {
        if !git2::Remote::is_valid_name(&self.name) {
            return Err(Error::Config(format!(
                "'{}' is not a valid remote name",
                self.name
            )));
        }

        let url = if ctx.features.http_transport {
            repo.http_url()?
        } else {
            repo.git_url()?
        };

        let path = repo.path().to_path_buf();
        let name = self.name.clone();

        debug!(repo = %repo, remote = %self.name, url = %url, "Setting remote");
        run_blocking(move || replace_remote(&path, &name, &url)).await
    }
}

fn replace_remote(path: &Path, name: &str, url: &str) -> Result<()> {
    let git = GitRepo::open(path)?;
    let inner = git.inner();

    match inner.find_remote(name) {
        Ok(_) => {
            debug!(remote = name, "Removing existing remote");
            inner.remote_delete(name)?;
        }
        Err(e) if e.code() == git2::ErrorCode::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    inner.remote(name, url)?;
    Ok(())
}
