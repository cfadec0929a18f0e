//! tentrack REST API client.
//!
//! Uses reqwest to call the inventory endpoints. Non-2xx responses keep the
//! raw response body as the error message.

use std::future::Future;

use tentrack_core::{NewTent, Stats, Tent, TentPatch};
use thiserror::Error;
use tracing::debug;

/// API client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// The five inventory operations.
///
/// Implemented by [`ApiClient`] and by fakes in tests.
pub trait TentApi: Send + Sync {
    fn list_tents(&self) -> impl Future<Output = Result<Vec<Tent>, ClientError>> + Send;

    fn create_tent(
        &self,
        new: &NewTent,
    ) -> impl Future<Output = Result<Tent, ClientError>> + Send;

    fn update_tent(
        &self,
        id: &str,
        patch: &TentPatch,
    ) -> impl Future<Output = Result<Tent, ClientError>> + Send;

    fn delete_tent(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn stats(&self) -> impl Future<Output = Result<Stats, ClientError>> + Send;
}

/// HTTP client for the tentrack API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Config("API URL is empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API URL must start with http:// or https://, got {base_url}"
            )));
        }

        // reqwest is built with rustls-no-provider; an Err means a provider is already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into [`ClientError::Api`] carrying the body text.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl TentApi for ApiClient {
    async fn list_tents(&self) -> Result<Vec<Tent>, ClientError> {
        let resp = self.http.get(self.url("/tents")).send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json().await?)
    }

    async fn create_tent(&self, new: &NewTent) -> Result<Tent, ClientError> {
        let resp = self.http.post(self.url("/tents")).json(new).send().await?;
        let resp = Self::check_status(resp).await?;
        let tent: Tent = resp.json().await?;
        debug!(id = %tent.id, "Tent created");
        Ok(tent)
    }

    async fn update_tent(&self, id: &str, patch: &TentPatch) -> Result<Tent, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/tents/{id}")))
            .json(patch)
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json().await?)
    }

    async fn delete_tent(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/tents/{id}")))
            .send()
            .await?;
        Self::check_status(resp).await?;
        debug!(id, "Tent deleted");
        Ok(())
    }

    async fn stats(&self) -> Result<Stats, ClientError> {
        let resp = self.http.get(self.url("/stats")).send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000");
        assert_eq!(client.url("/tents"), "http://localhost:4000/tents");
    }

    #[test]
    fn rejects_empty_and_schemeless_urls() {
        assert!(matches!(ApiClient::new("  "), Err(ClientError::Config(_))));
        assert!(matches!(
            ApiClient::new("localhost:4000"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn api_error_display_includes_body() {
        let err = ClientError::Api {
            status: 404,
            message: r#"{"code":"not_found","message":"tent x not found"}"#.into(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("tent x not found"));
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        // Port 9 (discard) is essentially never listening on loopback.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let result = client.list_tents().await;
        assert!(matches!(result, Err(ClientError::Http(_))));
    }
}
