//! Repositories and scratchpads: the places Git Tool can operate on

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::service::Service;
use crate::Result;

/// A location on disk that applications and tasks can be run against
pub trait Target {
    /// Short name of the target
    fn name(&self) -> &str;

    /// Location of the target on the local filesystem
    fn path(&self) -> &Path;

    /// Whether the target's directory is present
    fn exists(&self) -> bool {
        self.path().is_dir()
    }
}

/// A repository hosted by a [`Service`] and stored beneath the development
/// directory at `<root>/<domain>/<full name>`.
///
/// Repos are computed on demand and never cached, so `exists()` and
/// `valid()` always reflect the current state of the filesystem.
#[derive(Clone)]
pub struct Repo {
    full_name: String,
    service: Arc<Service>,
    path: PathBuf,
}

impl Repo {
    /// Create a repo for the given `/`-separated full name
    pub fn new(
        full_name: impl Into<String>,
        service: Arc<Service>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            service,
            path: path.into(),
        }
    }

    /// The repository's full name, including its namespace
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Everything in the full name before the final segment
    pub fn namespace(&self) -> &str {
        self.full_name
            .rsplit_once('/')
            .map(|(namespace, _)| namespace)
            .unwrap_or("")
    }

    /// The service hosting this repository
    pub fn service(&self) -> &Arc<Service> {
        &self.service
    }

    /// `domain/full name`, unique across all configured services
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.service.domain, self.full_name)
    }

    /// Whether the repository has been initialized (has a `.git` directory)
    pub fn valid(&self) -> bool {
        self.path.join(".git").is_dir()
    }

    /// Web page for this repository
    pub fn website(&self) -> Result<String> {
        self.service.website_for(self)
    }

    /// git+ssh remote URL
    pub fn git_url(&self) -> Result<String> {
        self.service.git_url_for(self)
    }

    /// git+http remote URL
    pub fn http_url(&self) -> Result<String> {
        self.service.http_url_for(self)
    }
}

impl Target for Repo {
    fn name(&self) -> &str {
        self.full_name
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.full_name)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repo")
            .field("domain", &self.service.domain)
            .field("full_name", &self.full_name)
            .field("path", &self.path)
            .finish()
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service.domain, self.full_name)
    }
}

impl PartialEq for Repo {
    fn eq(&self, other: &Self) -> bool {
        self.service.domain == other.service.domain
            && self.full_name == other.full_name
            && self.path == other.path
    }
}

impl Eq for Repo {}

/// A disposable working directory, usually named after an ISO week
/// (e.g. `2021w05`). Scratchpads have no hosting service or URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scratchpad {
    name: String,
    path: PathBuf,
}

impl Scratchpad {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Scratchpads need no initialization, so they are always valid
    pub fn valid(&self) -> bool {
        true
    }
}

impl Target for Scratchpad {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Scratchpad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
