//! Uploaded-file listing, upload, and deletion.
//!
//! v0.24 servers expose these as `resources`, v0.25+ as `attachments`;
//! the route split lives in [`Operation`], so this repository only deals
//! in the unified domain type.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use notewire_core::{last_segment, Resource, Result};

use crate::dto::{CreateResourceRequest, ListResourcesResponse, ResourceDto};
use crate::http::ApiClient;
use crate::version::Operation;

pub struct ResourceRepository {
    client: ApiClient,
}

impl ResourceRepository {
    pub fn new(client: ApiClient) -> Self {
        ResourceRepository { client }
    }

    pub async fn list_resources(&self) -> Result<Vec<Resource>> {
        let builder = self.client.request(&Operation::ListResources)?;
        let body: ListResourcesResponse = self.client.send_json(builder).await?;
        Ok(body.into_all().into_iter().map(Resource::from).collect())
    }

    /// Upload a file as a base64 JSON body.
    pub async fn upload_resource(
        &self,
        filename: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<Resource> {
        let builder = self
            .client
            .request(&Operation::CreateResource)?
            .json(&CreateResourceRequest {
                filename: filename.to_string(),
                mime_type: mime_type.to_string(),
                content: BASE64.encode(bytes),
            });
        Ok(Resource::from(
            self.client.send_json::<ResourceDto>(builder).await?,
        ))
    }

    /// Delete by resource name (`"attachments/42"`); only the trailing id
    /// segment travels in the path.
    pub async fn delete_resource(&self, name: &str) -> Result<()> {
        let builder = self.client.request(&Operation::DeleteResource {
            name_segment: last_segment(name),
        })?;
        self.client.send_unit(builder).await
    }
}
