//! Hosting services and the conventions they impose on the development directory

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::target::{Repo, Target};
use crate::{Error, Result};

/// How many path segments make up a repository's name under a service.
///
/// Parsed from a pattern such as `*/*` (namespace/name) or `*/*/*`
/// (org/project/repo) so the depth is known without re-parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryGlob {
    segments: usize,
}

impl DirectoryGlob {
    /// Create a glob matching exactly `segments` path segments
    pub fn new(segments: usize) -> Result<Self> {
        if segments == 0 {
            return Err(Error::Config(
                "A directory glob must contain at least one segment".to_string(),
            ));
        }

        Ok(Self { segments })
    }

    /// Parse a pattern made of `/`-separated `*` segments
    pub fn parse(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.trim_matches('/').split('/').collect();
        if parts.iter().any(|p| *p != "*") {
            return Err(Error::Config(format!(
                "Invalid directory glob '{}'. Expected a pattern like '*/*'.",
                pattern
            )));
        }

        Self::new(parts.len())
    }

    /// Number of path segments in a repository's full name
    pub fn segments(&self) -> usize {
        self.segments
    }
}

impl fmt::Display for DirectoryGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&vec!["*"; self.segments].join("/"))
    }
}

impl Serialize for DirectoryGlob {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DirectoryGlob {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let pattern = String::deserialize(deserializer)?;
        Self::parse(&pattern).map_err(serde::de::Error::custom)
    }
}

/// A git hosting service responsible for storing and serving repositories.
///
/// URL templates use placeholders such as `{{ .Service.Domain }}` and
/// `{{ .Repo.FullName }}`, optionally piped through `urlquery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Canonical domain, e.g. `github.com`
    pub domain: String,

    /// Layout of repository folders beneath the service's folder
    pub pattern: DirectoryGlob,

    /// Template for the repository's web page
    pub website: String,

    /// Template for the git+ssh remote URL
    #[serde(rename = "gitUrl")]
    pub git_url: String,

    /// Template for the git+http remote URL
    #[serde(rename = "httpUrl")]
    pub http_url: String,
}

impl Service {
    /// Create a service with the given domain and glob, and templates which
    /// follow the common `domain/namespace/name` convention.
    pub fn new(domain: impl Into<String>, pattern: DirectoryGlob) -> Self {
        Self {
            domain: domain.into(),
            pattern,
            website: "https://{{ .Service.Domain }}/{{ .Repo.FullName }}".to_string(),
            git_url: "git@{{ .Service.Domain }}:{{ .Repo.FullName }}.git".to_string(),
            http_url: "https://{{ .Service.Domain }}/{{ .Repo.FullName }}.git".to_string(),
        }
    }

    /// Render the website URL for a repository
    pub fn website_for(&self, repo: &Repo) -> Result<String> {
        render(&self.website, self, repo)
    }

    /// Render the git+ssh URL for a repository
    pub fn git_url_for(&self, repo: &Repo) -> Result<String> {
        render(&self.git_url, self, repo)
    }

    /// Render the git+http URL for a repository
    pub fn http_url_for(&self, repo: &Repo) -> Result<String> {
        render(&self.http_url, self, repo)
    }
}

/// Supplies the services, default service and aliases used for resolution
pub trait ServiceRegistry {
    /// Find the service whose domain matches exactly
    fn service(&self, domain: &str) -> Option<Arc<Service>>;

    /// The service used for names without a domain prefix
    fn default_service(&self) -> Option<Arc<Service>>;

    /// Expansion of a user-defined alias, if one exists
    fn alias(&self, name: &str) -> Option<String>;
}

/// GitHub, GitLab, Bitbucket and Azure DevOps with their usual layouts
pub(crate) fn default_services() -> Vec<Arc<Service>> {
    let namespace_name = DirectoryGlob { segments: 2 };

    vec![
        Arc::new(Service::new("github.com", namespace_name)),
        Arc::new(Service::new("gitlab.com", namespace_name)),
        Arc::new(Service::new("bitbucket.org", namespace_name)),
        Arc::new(Service {
            domain: "dev.azure.com".to_string(),
            pattern: DirectoryGlob { segments: 3 },
            website: "https://{{ .Service.Domain }}/{{ .Repo.Namespace }}/_git/{{ .Repo.Name }}"
                .to_string(),
            git_url: "git@ssh.{{ .Service.Domain }}:v3/{{ .Repo.FullName }}.git".to_string(),
            http_url: "https://{{ .Service.Domain }}/{{ .Repo.Namespace }}/_git/{{ .Repo.Name }}"
                .to_string(),
        }),
    ]
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*\.([A-Za-z]+)\.([A-Za-z]+)\s*(?:\|\s*([a-z]+)\s*)?\}\}")
            .expect("placeholder regex is valid")
    })
}

fn render(template: &str, service: &Service, repo: &Repo) -> Result<String> {
    let mut failure = None;

    let rendered = placeholder().replace_all(template, |caps: &Captures| {
        let value = match (&caps[1], &caps[2]) {
            ("Service", "Domain") => service.domain.clone(),
            ("Repo", "FullName") => repo.full_name().to_string(),
            ("Repo", "Name") => repo.name().to_string(),
            ("Repo", "Namespace") => repo.namespace().to_string(),
            (obj, field) => {
                failure.get_or_insert_with(|| {
                    format!("unknown field '.{}.{}' in '{}'", obj, field, template)
                });
                return String::new();
            }
        };

        match caps.get(3).map(|m| m.as_str()) {
            None => value,
            Some("urlquery") => {
                url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
            }
            Some(filter) => {
                failure.get_or_insert_with(|| {
                    format!("unknown filter '{}' in '{}'", filter, template)
                });
                String::new()
            }
        }
    });

    match failure {
        Some(message) => Err(Error::Template(message)),
        None => Ok(rendered.into_owned()),
    }
}
