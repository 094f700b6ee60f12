//! HTTP execution shared by all repositories.
//!
//! [`ApiClient`] owns the reqwest client (timeouts configured once here,
//! not per operation), resolves [`Operation`]s against the live session's
//! server URL and version, attaches the stored credential, and maps
//! responses into the notewire error taxonomy. It does not retry.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use notewire_core::{Error, Result};

use crate::auth::auth_header;
use crate::session::Session;
use crate::version::Operation;

/// Connect/read timeout applied once at client construction (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared HTTP executor bound to one [`Session`].
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    session: Session,
}

impl ApiClient {
    pub fn new(session: Session) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        ApiClient { http, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build a request for `op` against the active server URL and version,
    /// with the stored credential attached when present.
    pub fn request(&self, op: &Operation<'_>) -> Result<RequestBuilder> {
        let base = self
            .session
            .server_url()
            .ok_or_else(|| Error::InvalidInput("no server URL configured".to_string()))?;
        let version = self.session.server_version();
        let route = op.route(version);
        debug!(
            server_version = version.as_tag(),
            method = %route.method,
            path = %route.path,
            "routing operation"
        );

        let mut builder = self
            .http
            .request(route.method, format!("{base}/{}", route.path));
        if let Some(token) = self.session.access_token() {
            let (name, value) = auth_header(version, &token);
            builder = builder.header(name, value);
        }
        Ok(builder)
    }

    /// Send and surface any non-2xx status as a typed error carrying the
    /// status code and response body text.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(Error::from)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("no body").to_string()
            } else {
                body
            };
            return Err(Error::from_status(status.as_u16(), message));
        }
        Ok(response)
    }

    /// Send and decode a JSON response body.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let raw = response.text().await.map_err(Error::from)?;
        serde_json::from_str(&raw).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Send and discard the response body.
    pub async fn send_unit(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await.map(|_| ())
    }
}
