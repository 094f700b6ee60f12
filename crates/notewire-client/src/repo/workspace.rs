//! Workspace profile and server-level configuration.

use notewire_core::{IdentityProvider, Result, WorkspaceProfile};

use crate::dto::{ListIdentityProvidersResponse, WorkspaceProfileDto};
use crate::http::ApiClient;
use crate::version::Operation;

pub struct WorkspaceRepository {
    client: ApiClient,
}

impl WorkspaceRepository {
    pub fn new(client: ApiClient) -> Self {
        WorkspaceRepository { client }
    }

    /// The workspace profile is served unauthenticated; it reports the
    /// server's own version string.
    pub async fn get_profile(&self) -> Result<WorkspaceProfile> {
        let builder = self.client.request(&Operation::GetWorkspaceProfile)?;
        Ok(WorkspaceProfile::from(
            self.client.send_json::<WorkspaceProfileDto>(builder).await?,
        ))
    }

    pub async fn list_identity_providers(&self) -> Result<Vec<IdentityProvider>> {
        let builder = self.client.request(&Operation::ListIdentityProviders)?;
        let body: ListIdentityProvidersResponse = self.client.send_json(builder).await?;
        Ok(body
            .identity_providers
            .into_iter()
            .map(IdentityProvider::from)
            .collect())
    }
}
