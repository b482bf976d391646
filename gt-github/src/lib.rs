//! Git Tool GitHub - GitHub host provider for Git Tool
//!
//! Lets Git Tool check for and create repositories on github.com when new
//! repositories are created locally.

mod error;
mod host;

pub use error::{Error, Result};
pub use host::GitHubHost;
