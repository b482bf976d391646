//! Configuration management for Git Tool
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (GT_DIRECTORY, DEV_DIRECTORY, GT_SCRATCH_DIRECTORY)
//! 3. Config file (~/.config/gt/config.toml)
//! 4. Default values

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::service::{default_services, Service, ServiceRegistry};
use crate::{Error, Result};

/// Switches controlling optional behaviour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Features {
    /// Clone with the `git` executable instead of the git library
    pub native_clone: bool,

    /// Create the repository on its hosting service when creating it locally
    pub create_remote: bool,

    /// Use git+http URLs for remotes instead of git+ssh
    pub http_transport: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            native_clone: false,
            create_remote: true,
            http_transport: false,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Development directory holding `<domain>/<repo>` folders
    pub directory: PathBuf,

    /// Scratchpad directory, defaults to `<directory>/scratch`
    pub scratchpads: Option<PathBuf>,

    /// Known hosting services; the first is the default
    pub services: Vec<Arc<Service>>,

    /// Short names which expand to full repository names
    pub aliases: HashMap<String, String>,

    /// Optional behaviour
    pub features: Features,
}

impl Default for Config {
    fn default() -> Self {
        let directory = dirs::home_dir()
            .map(|home| home.join("dev"))
            .unwrap_or_else(|| PathBuf::from("dev"));

        Self::for_dev_directory(directory)
    }
}

impl Config {
    /// Default configuration rooted at a specific development directory
    pub fn for_dev_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            scratchpads: None,
            services: default_services(),
            aliases: HashMap::new(),
            features: Features::default(),
        }
    }

    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::fs(format!("Failed to read config file {}", path.display()), e))?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/gt/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gt").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - GT_DIRECTORY (or DEV_DIRECTORY): development directory
    /// - GT_SCRATCH_DIRECTORY: scratchpad directory
    pub fn with_env_overrides(mut self) -> Self {
        let directory = std::env::var("GT_DIRECTORY").or_else(|_| std::env::var("DEV_DIRECTORY"));
        if let Ok(directory) = directory {
            if !directory.is_empty() {
                self.directory = PathBuf::from(directory);
            }
        }

        if let Ok(scratch) = std::env::var("GT_SCRATCH_DIRECTORY") {
            if !scratch.is_empty() {
                self.scratchpads = Some(PathBuf::from(scratch));
            }
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, directory: Option<PathBuf>) -> Self {
        if let Some(directory) = directory {
            self.directory = directory;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(directory: Option<PathBuf>) -> Result<Self> {
        Ok(Self::load()?.with_env_overrides().with_cli_overrides(directory))
    }

    /// The development directory
    pub fn dev_directory(&self) -> &Path {
        &self.directory
    }

    /// The scratchpad directory
    pub fn scratch_directory(&self) -> PathBuf {
        self.scratchpads
            .clone()
            .unwrap_or_else(|| self.directory.join("scratch"))
    }

    /// All configured services, in priority order
    pub fn services(&self) -> &[Arc<Service>] {
        &self.services
    }
}

impl ServiceRegistry for Config {
    fn service(&self, domain: &str) -> Option<Arc<Service>> {
        self.services.iter().find(|s| s.domain == domain).cloned()
    }

    fn default_service(&self) -> Option<Arc<Service>> {
        self.services.first().cloned()
    }

    fn alias(&self, name: &str) -> Option<String> {
        self.aliases.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::for_dev_directory("/dev");
        assert_eq!(config.dev_directory(), Path::new("/dev"));
        assert_eq!(config.scratch_directory(), PathBuf::from("/dev/scratch"));
        assert_eq!(config.services().len(), 4);
        assert!(config.features.create_remote);
        assert!(!config.features.native_clone);
        assert!(!config.features.http_transport);
    }

    #[test]
    fn test_service_registry() {
        let config = Config::for_dev_directory("/dev");
        assert_eq!(config.default_service().unwrap().domain, "github.com");
        assert_eq!(config.service("dev.azure.com").unwrap().pattern.segments(), 3);
        assert!(config.service("example.com").is_none());
        assert!(config.alias("gt").is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let config =
            Config::for_dev_directory("/dev").with_cli_overrides(Some(PathBuf::from("/src")));
        assert_eq!(config.dev_directory(), Path::new("/src"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
directory = "/home/user/dev"
scratchpads = "/tmp/scratch"

[aliases]
gt = "github.com/sierrasoftworks/git-tool"

[features]
native_clone = true

[[services]]
domain = "github.com"
pattern = "*/*"
website = "https://{{ .Service.Domain }}/{{ .Repo.FullName }}"
gitUrl = "git@{{ .Service.Domain }}:{{ .Repo.FullName }}.git"
httpUrl = "https://{{ .Service.Domain }}/{{ .Repo.FullName }}.git"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.dev_directory(), Path::new("/home/user/dev"));
        assert_eq!(config.scratch_directory(), PathBuf::from("/tmp/scratch"));
        assert_eq!(config.services().len(), 1);
        assert_eq!(
            config.alias("gt"),
            Some("github.com/sierrasoftworks/git-tool".to_string())
        );
        assert!(config.features.native_clone);
        // Unspecified features keep their defaults
        assert!(config.features.create_remote);
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
directory = "/code"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.dev_directory(), Path::new("/code"));
        assert_eq!(config.default_service().unwrap().domain, "github.com");
    }
}
