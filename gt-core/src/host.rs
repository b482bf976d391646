//! Integration points for git hosting providers

use std::sync::Arc;

use async_trait::async_trait;

use crate::service::Service;
use crate::target::Repo;
use crate::Result;

/// Creates and inspects repositories on a remote git hosting service
#[async_trait]
pub trait HostProvider: Send + Sync {
    /// Whether this provider manages repositories for the given service
    fn handles(&self, service: &Service) -> bool;

    /// Whether the repository exists on the hosting service
    async fn has_repo(&self, repo: &Repo) -> Result<bool>;

    /// Create the repository on the hosting service
    async fn create_repo(&self, repo: &Repo) -> Result<()>;
}

/// The set of host providers available to a command
#[derive(Clone, Default)]
pub struct HostRegistry {
    hosts: Vec<Arc<dyn HostProvider>>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider; earlier registrations win when several handle a service
    pub fn with_host(mut self, host: impl HostProvider + 'static) -> Self {
        self.hosts.push(Arc::new(host));
        self
    }

    /// Find the provider responsible for a service
    pub fn host_for(&self, service: &Service) -> Option<Arc<dyn HostProvider>> {
        self.hosts.iter().find(|h| h.handles(service)).cloned()
    }
}

impl std::fmt::Debug for HostRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostRegistry")
            .field("hosts", &self.hosts.len())
            .finish()
    }
}
