//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),
}

impl From<Error> for gt_core::Error {
    fn from(err: Error) -> Self {
        gt_core::Error::Host(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_core_error() {
        let err: gt_core::Error = Error::Auth("Invalid GitHub token".to_string()).into();
        assert!(matches!(err, gt_core::Error::Host(_)));
        assert_eq!(
            err.to_string(),
            "Remote host error: GitHub authentication error: Invalid GitHub token"
        );
    }
}
