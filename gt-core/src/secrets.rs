//! Access tokens for hosting services
//!
//! Tokens are stored separately from configuration to avoid accidental sharing.
//! The secrets file is located at `~/.config/gt/secrets.toml`, keyed by service
//! domain, and must have restrictive permissions (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variables (GITHUB_TOKEN for github.com)
//! 2. Secrets file (~/.config/gt/secrets.toml)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// Access tokens keyed by service domain
    pub tokens: HashMap<String, String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_secrets_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &Path) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path)
                .map_err(|e| Error::fs(format!("Failed to read {}", path.display()), e))?;
            let mode = metadata.permissions().mode();

            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::fs(format!("Failed to read {}", path.display()), e))?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        for token in secrets.tokens.values_mut() {
            *token = token.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/gt/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gt").join("secrets.toml"))
    }

    /// Get the token for a service, preferring the environment
    pub fn token(&self, domain: &str) -> Option<String> {
        if let Some(var) = env_var_for(domain) {
            if let Ok(token) = std::env::var(var) {
                let token = token.trim().to_string();
                if !token.is_empty() {
                    debug!(domain, var, "Using token from environment variable");
                    return Some(token);
                }
            }
        }

        self.tokens
            .get(domain)
            .filter(|token| !token.is_empty())
            .cloned()
    }
}

fn env_var_for(domain: &str) -> Option<&'static str> {
    match domain {
        "github.com" => Some("GITHUB_TOKEN"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_secrets() {
        let toml = r#"
[tokens]
"gitlab.com" = "glpat_xxxxxxxxxxxx"
"#;
        let secrets: Secrets = toml::from_str(toml).unwrap();
        assert_eq!(secrets.token("gitlab.com"), Some("glpat_xxxxxxxxxxxx".to_string()));
        assert_eq!(secrets.token("bitbucket.org"), None);
    }

    #[test]
    fn test_empty_token_ignored() {
        let mut secrets = Secrets::default();
        secrets.tokens.insert("gitlab.com".to_string(), String::new());
        assert_eq!(secrets.token("gitlab.com"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_insecure_permissions_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[tokens]\n\"gitlab.com\" = \"test\"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o644);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let result = Secrets::load_from_file(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("insecure permissions"));
    }

    #[cfg(unix)]
    #[test]
    fn test_secure_permissions_accepted() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[tokens]\n\"gitlab.com\" = \"  glpat_test  \"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let secrets = Secrets::load_from_file(file.path()).unwrap();
        assert_eq!(secrets.token("gitlab.com"), Some("glpat_test".to_string()));
    }
}
