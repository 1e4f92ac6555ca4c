//! Configuration module
//!
//! Handles CLI configuration: where the server lives and which token to send.

use ecoburn_client::EcoBurnClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the EcoBurn server
    pub server_url: String,
    /// Bearer token for API calls
    pub token: Option<String>,
}

impl Config {
    /// Build an API client from this configuration
    pub fn client(&self) -> EcoBurnClient {
        let client = EcoBurnClient::new(&self.server_url);
        match &self.token {
            Some(token) => client.with_token(token),
            None => client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let config = Config {
            server_url: "http://burn.local:8080/".to_string(),
            token: Some("admin-token".to_string()),
        };
        let client = config.client();
        assert_eq!(client.base_url(), "http://burn.local:8080");
        assert!(client.has_token());

        let anonymous = Config { token: None, ..config };
        assert!(!anonymous.client().has_token());
    }
}
