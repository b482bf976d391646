//! Git Tool Core - repository resolution and git workflows
//!
//! This crate maps short repository names onto a development directory laid
//! out as `<root>/<service domain>/<namespace>/<name>`, and provides the
//! reentrant tasks used to create, clone and switch branches in those
//! repositories.

pub mod config;
pub mod error;
pub mod git;
pub mod host;
pub mod initializer;
pub mod matcher;
pub mod resolver;
pub mod secrets;
pub mod service;
pub mod target;
pub mod tasks;

pub use config::{Config, Features};
pub use error::{Error, Result};
pub use host::{HostProvider, HostRegistry};
pub use initializer::Initializer;
pub use resolver::Resolver;
pub use secrets::Secrets;
pub use service::{DirectoryGlob, Service, ServiceRegistry};
pub use target::{Repo, Scratchpad, Target};
pub use tasks::{Task, TaskContext};
