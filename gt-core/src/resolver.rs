//! Mapping between short repository names and folders in the development directory

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Config;
use crate::git::GitRepo;
use crate::matcher::matches;
use crate::service::{Service, ServiceRegistry};
use crate::target::{Repo, Scratchpad, Target};
use crate::{Error, Result};

/// Resolves repositories and scratchpads from names, paths and fuzzy queries.
///
/// Nothing is cached between calls: every lookup reflects the filesystem as
/// it is right now.
pub struct Resolver<'a> {
    registry: &'a dyn ServiceRegistry,
    dev_dir: PathBuf,
    scratch_dir: PathBuf,
}

impl<'a> Resolver<'a> {
    pub fn new(
        registry: &'a dyn ServiceRegistry,
        dev_dir: impl Into<PathBuf>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            dev_dir: dev_dir.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Resolver for the directories and services in a config
    pub fn from_config(config: &'a Config) -> Self {
        Self::new(config, config.dev_directory(), config.scratch_directory())
    }

    /// The development directory being resolved against
    pub fn dev_directory(&self) -> &Path {
        &self.dev_dir
    }

    /// Find the single repository best matching `name`.
    ///
    /// Aliases are expanded first. A name with a recognisable shape wins
    /// outright, whether or not it exists on disk. Otherwise the qualified
    /// names of all local repositories are fuzzy matched, and anything other
    /// than exactly one match is an error.
    pub fn get_best_repo(&self, name: &str) -> Result<Repo> {
        let name = match self.registry.alias(name) {
            Some(expansion) => {
                debug!(alias = name, expansion = %expansion, "Expanded repository alias");
                expansion
            }
            None => name.to_string(),
        };

        if let Some(repo) = self.get_repo(&name)? {
            return Ok(repo);
        }

        let query = name.to_lowercase();
        let mut matched: Vec<Repo> = self
            .get_repos()?
            .into_iter()
            .filter(|r| matches(&r.qualified_name().to_lowercase(), &query))
            .collect();

        if matched.len() == 1 {
            return Ok(matched.remove(0));
        }

        debug!(name = %name, candidates = matched.len(), "Fuzzy match was not unique");
        Err(Error::RepoNotFound { name })
    }

    /// All repositories in the development directory, grouped by service.
    ///
    /// Folders which don't correspond to a configured service are skipped.
    pub fn get_repos(&self) -> Result<Vec<Repo>> {
        debug!(path = %self.dev_dir.display(), "Searching for repositories");

        let entries = std::fs::read_dir(&self.dev_dir).map_err(|e| {
            Error::fs(
                format!(
                    "Unable to list the development directory {}",
                    self.dev_dir.display()
                ),
                e,
            )
        })?;

        let mut folders = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                Error::fs(
                    format!(
                        "Unable to list the development directory {}",
                        self.dev_dir.display()
                    ),
                    e,
                )
            })?;

            let path = entry.path();
            if path.is_dir() && path != self.scratch_dir {
                folders.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        folders.sort();

        let mut repos = Vec::new();
        for folder in folders {
            match self.registry.service(&folder) {
                Some(service) => repos.extend(self.get_repos_for_service(&service)?),
                None => warn!(
                    service = %folder,
                    "Could not find a matching service entry in your configuration"
                ),
            }
        }

        Ok(repos)
    }

    /// All repositories stored under a service's folder
    pub fn get_repos_for_service(&self, service: &Arc<Service>) -> Result<Vec<Repo>> {
        debug!(service = %service.domain, "Enumerating repositories for service");

        let base = self.dev_dir.join(&service.domain);
        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&base.to_string_lossy()),
            service.pattern
        );

        let mut repos = Vec::new();
        for path in glob::glob(&pattern)? {
            let path = match path {
                Ok(path) => path,
                Err(e) => {
                    warn!(
                        path = %e.path().display(),
                        error = %e.error(),
                        "Unable to read directory, skipping"
                    );
                    continue;
                }
            };

            let Some(full_name) = relative_name(&base, &path) else {
                continue;
            };

            let repo = Repo::new(full_name, service.clone(), path);
            if repo.exists() {
                repos.push(repo);
            } else {
                debug!(
                    service = %service.domain,
                    path = %repo.path().display(),
                    "Skipping entry which is not a directory"
                );
            }
        }

        Ok(repos)
    }

    /// Resolve a repository from its name without consulting the filesystem.
    ///
    /// An empty name resolves the repository containing the current
    /// directory. Names need at least two segments, and are tried as
    /// `domain/...`, then against the default service. `None` means the name
    /// doesn't have the shape of a repository.
    pub fn get_repo(&self, name: &str) -> Result<Option<Repo>> {
        if name.is_empty() {
            return self.get_current_directory_repo();
        }

        let parts = split_name(name);
        if parts.len() < 2 {
            debug!(name, "Not a repository name");
            return Ok(None);
        }

        if let Some(service) = parts.first().and_then(|domain| self.registry.service(domain)) {
            return Ok(self.get_repo_for_service(&service, &parts[1..].join("/")));
        }

        if let Some(repo) = self.get_fully_qualified_repo(name)? {
            return Ok(Some(repo));
        }

        let service = self
            .registry
            .default_service()
            .ok_or(Error::NoDefaultService)?;

        let repo = self.get_repo_for_service(&service, name);
        if repo.is_none() {
            debug!(name, "Could not find a matching repository");
        }

        Ok(repo)
    }

    /// Build the repository named by the first segments of `name`.
    ///
    /// Exactly as many segments as the service's glob are used; any further
    /// segments are ignored, so paths inside a repository resolve to it.
    pub fn get_repo_for_service(&self, service: &Arc<Service>, name: &str) -> Option<Repo> {
        let parts = split_name(name);
        let depth = service.pattern.segments();

        if parts.len() < depth {
            debug!(
                name,
                service = %service.domain,
                "Not a fully named repository for this service"
            );
            return None;
        }

        let parts = &parts[..depth];
        let path = parts
            .iter()
            .fold(self.dev_dir.join(&service.domain), |path, part| path.join(part));

        Some(Repo::new(parts.join("/"), service.clone(), path))
    }

    /// Resolve a `domain/namespace/.../name` repository name
    pub fn get_fully_qualified_repo(&self, name: &str) -> Result<Option<Repo>> {
        let parts = split_name(name);
        if parts.len() < 2 {
            debug!(name, "Not a fully qualified repository name");
            return Ok(None);
        }

        let Some(service) = self.registry.service(parts[0]) else {
            debug!(name, "No service found to handle repository type");
            return Ok(None);
        };

        Ok(self.get_repo_for_service(&service, &parts[1..].join("/")))
    }

    /// The repository containing the current working directory
    pub fn get_current_directory_repo(&self) -> Result<Option<Repo>> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::fs("Unable to read the current directory", e))?;

        self.repo_for_path(&cwd)
    }

    /// The repository containing `path`, if it is inside the development
    /// directory
    pub fn repo_for_path(&self, path: &Path) -> Result<Option<Repo>> {
        let Some(name) = relative_name(&self.dev_dir, path) else {
            debug!(path = %path.display(), "Not within the development directory");
            return Ok(None);
        };

        self.get_fully_qualified_repo(&name)
    }

    /// Local and remote-tracking branch names of a repository.
    ///
    /// Each branch appears under its bare name, and remote-tracking branches
    /// additionally under `<remote>/<name>`.
    pub fn get_branches(&self, repo: &Repo) -> Result<Vec<String>> {
        let git = GitRepo::open(repo.path())?;
        Ok(git.branch_names()?.into_iter().collect())
    }

    /// The scratchpad named by the first segment of `name`
    pub fn get_scratchpad(&self, name: &str) -> Option<Scratchpad> {
        let name = split_name(name).into_iter().next()?;
        Some(Scratchpad::new(name, self.scratch_dir.join(name)))
    }

    /// The scratchpad for the current ISO week, e.g. `2021w05`
    pub fn current_scratchpad(&self) -> Scratchpad {
        let name = chrono::Local::now().format("%Gw%V").to_string();
        let path = self.scratch_dir.join(&name);
        Scratchpad::new(name, path)
    }

    /// All scratchpads present on disk
    pub fn get_scratchpads(&self) -> Result<Vec<Scratchpad>> {
        if !self.scratch_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.scratch_dir).map_err(|e| {
            Error::fs(
                format!(
                    "Unable to list the scratch directory {}",
                    self.scratch_dir.display()
                ),
                e,
            )
        })?;

        let mut scratchpads = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                Error::fs(
                    format!(
                    "Unable to list the scratch directory {}",
                    self.scratch_dir.display()
                ),
                    e,
                )
            })?;

            if entry.path().is_dir() {
                let name = entry.file_name().to_string_lossy().to_string();
                scratchpads.push(Scratchpad::new(name, entry.path()));
            }
        }

        scratchpads.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(scratchpads)
    }
}

/// Split a name on `/` (or `\`), ignoring empty segments
fn split_name(name: &str) -> Vec<&str> {
    name.split(['/', '\\']).filter(|s| !s.is_empty()).collect()
}

/// `path` relative to `base`, as a `/`-separated name
fn relative_name(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    Some(parts.join("/"))
}
