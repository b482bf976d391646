//! CLI command implementations

use anyhow::anyhow;
use gt_core::tasks::TaskContext;
use gt_core::{Config, HostRegistry, Initializer, Repo, Resolver, Secrets};
use gt_github::GitHubHost;

pub mod branch;
pub mod clone;
pub mod info;
pub mod list;
pub mod new;
pub mod scratch;

pub use branch::{BranchArgs, BranchesArgs};
pub use clone::CloneArgs;
pub use info::InfoArgs;
pub use list::ListArgs;
pub use new::NewArgs;
pub use scratch::ScratchArgs;

/// Everything a single command invocation works with
pub struct Session {
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::from_config(&self.config)
    }

    /// Initializer without any hosting providers
    pub fn local_initializer(&self) -> Initializer {
        Initializer::new(TaskContext::from_config(&self.config, HostRegistry::new()))
    }

    /// Initializer able to create repositories on their hosting services
    pub fn remote_initializer(&self) -> anyhow::Result<Initializer> {
        let secrets = Secrets::load()?;
        let hosts = HostRegistry::new().with_host(GitHubHost::from_secrets(&secrets)?);

        Ok(Initializer::new(TaskContext::from_config(&self.config, hosts)))
    }

    /// The named repository, or the one containing the current directory
    pub fn repo_or_current(&self, name: Option<&str>) -> anyhow::Result<Repo> {
        let resolver = self.resolver();
        match name {
            Some(name) => Ok(resolver.get_best_repo(name)?),
            None => resolver.get_current_directory_repo()?.ok_or_else(|| {
                anyhow!(
                    "The current directory is not inside a repository in {}",
                    resolver.dev_directory().display()
                )
            }),
        }
    }
}
