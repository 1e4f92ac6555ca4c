//! EcoBurn HTTP Client
//!
//! A simple, type-safe HTTP client for the EcoBurn server API, shared by the
//! CLI and any other tooling that reads burn jobs or triggers bulk transitions.
//!
//! # Example
//!
//! ```no_run
//! use ecoburn_client::EcoBurnClient;
//! use ecoburn_core::domain::status::BurnStatus;
//! use ecoburn_core::dto::bulk::BulkTransitionForm;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = EcoBurnClient::new("http://localhost:8080").with_token("admin-token");
//!
//!     let response = client
//!         .bulk_update(BulkTransitionForm::new(
//!             "2024-12-01", "00:00", "2024-12-02", "23:59",
//!             BurnStatus::Completed,
//!         ))
//!         .await?;
//!
//!     println!("{}", response.message);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

/// HTTP client for the EcoBurn server API
///
/// Every API call except the health check carries the configured bearer
/// token. Without a token, calls fail with [`ClientError::Unauthenticated`]
/// before anything is sent.
#[derive(Debug, Clone)]
pub struct EcoBurnClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// Bearer token sent with every API request
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl EcoBurnClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use ecoburn_client::EcoBurnClient;
    ///
    /// let client = EcoBurnClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Attach the bearer token used for API calls
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
        self
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Check that the server is up
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Request Builders
    // =============================================================================

    /// Start an authenticated request to `path`
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ClientError::Unauthenticated("no API token configured".to_string()))?;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        Ok(self.client.request(method, &url).bearer_auth(token))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::from_response(status.as_u16(), &error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::from_response(status.as_u16(), &error_text));
        }

        Ok(())
    }
}
