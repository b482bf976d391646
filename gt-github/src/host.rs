//! GitHub host provider using octocrab

use async_trait::async_trait;
use gt_core::{HostProvider, Repo, Secrets, Service, Target};
use octocrab::Octocrab;
use serde::Serialize;
use tracing::{debug, info};

use crate::{Error, Result};

const DOMAIN: &str = "github.com";

#[derive(Serialize)]
struct CreateRepository<'a> {
    name: &'a str,
    private: bool,
}

/// Creates and looks up repositories on github.com
pub struct GitHubHost {
    client: Octocrab,
}

impl GitHubHost {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Build a client using the github.com token, if one is configured.
    ///
    /// Without a token only public lookups will succeed.
    pub fn from_secrets(secrets: &Secrets) -> Result<Self> {
        let builder = match secrets.token(DOMAIN) {
            Some(token) => Octocrab::builder().personal_token(token),
            None => {
                debug!("No GitHub token configured, using anonymous access");
                Octocrab::builder()
            }
        };

        let client = builder
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        Ok(Self::new(client))
    }

    async fn exists(&self, owner: &str, name: &str) -> Result<bool> {
        debug!(owner, name, "Checking for GitHub repository");

        match self.client.repos(owner, name).get().await {
            Ok(_) => Ok(true),
            Err(octocrab::Error::GitHub { source, .. }) if source.message.contains("Not Found") => {
                Ok(false)
            }
            Err(octocrab::Error::GitHub { source, .. })
                if source.message.contains("Bad credentials") =>
            {
                Err(Error::Auth("Invalid GitHub token".to_string()))
            }
            Err(e) => Err(Error::Api(e)),
        }
    }

    async fn create(&self, owner: &str, name: &str) -> Result<()> {
        let login = self.client.current().user().await?.login;
        let route = creation_route(owner, &login);

        info!(owner, name, route = %route, "Creating private GitHub repository");
        let _: octocrab::models::Repository = self
            .client
            .post(
                route,
                Some(&CreateRepository {
                    name,
                    private: true,
                }),
            )
            .await?;

        Ok(())
    }
}

/// Repositories in the authenticated user's own namespace are created under
/// `/user`, everything else is assumed to be an organisation
fn creation_route(owner: &str, login: &str) -> String {
    if owner.eq_ignore_ascii_case(login) {
        "/user/repos".to_string()
    } else {
        format!("/orgs/{}/repos", owner)
    }
}

#[async_trait]
impl HostProvider for GitHubHost {
    fn handles(&self, service: &Service) -> bool {
        service.domain == DOMAIN
    }

    async fn has_repo(&self, repo: &Repo) -> gt_core::Result<bool> {
        Ok(self.exists(repo.namespace(), repo.name()).await?)
    }

    async fn create_repo(&self, repo: &Repo) -> gt_core::Result<()> {
        Ok(self.create(repo.namespace(), repo.name()).await?)
    }
}

impl std::fmt::Debug for GitHubHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubHost").finish_non_exhaustive()
    }
}
