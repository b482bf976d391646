//! Error types for Git Tool

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Git Tool operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Git Tool operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error with a description of what was being attempted
    #[error("{context}: {source}")]
    Fs {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Error raised by the git library
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Invalid filesystem glob
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A service URL template could not be rendered
    #[error("Template error: {0}")]
    Template(String),

    /// The target directory is not an initialized git repository
    #[error("Unable to open repository at {}. Make sure it has been cloned or created first.", path.display())]
    NotARepository { path: PathBuf },

    /// Uncommitted changes block a branch change
    #[error("Cannot change branches while the workspace at {} has uncommitted changes. Commit or stash them first.", path.display())]
    WorkspaceNotClean { path: PathBuf },

    /// Fuzzy resolution matched zero or several repositories
    #[error("Could not find repository '{name}'. Try using its fully qualified name.")]
    RepoNotFound { name: String },

    /// No services have been configured, so short names cannot be resolved
    #[error("No default service is configured. Add at least one service to your configuration.")]
    NoDefaultService,

    /// An external command failed
    #[error("Command failed: {0}")]
    Command(String),

    /// Failure surfaced by a remote hosting provider
    #[error("Remote host error: {0}")]
    Host(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an IO error with a description of the operation that failed
    pub fn fs(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Fs {
            context: context.into(),
            source,
        }
    }

    /// Whether this error describes something the user can correct, and so
    /// should be shown to them verbatim rather than as an internal fault.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::NotARepository { .. }
                | Error::WorkspaceNotClean { .. }
                | Error::RepoNotFound { .. }
                | Error::NoDefaultService
        )
    }
}
