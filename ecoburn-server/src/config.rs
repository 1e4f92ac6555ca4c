//! Server configuration
//!
//! All settings come from environment variables so the same binary runs
//! against an in-memory store during development and Postgres in production.

use ecoburn_core::domain::status::TransitionPolicy;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to (e.g., "0.0.0.0:8080")
    pub bind_addr: String,

    /// Postgres connection string; the in-memory store is used when absent
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    pub max_db_connections: u32,

    /// Bearer tokens accepted by the API
    pub api_tokens: Vec<String>,

    /// Which status reassignments updates may perform
    pub transition_policy: TransitionPolicy,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(api_tokens: Vec<String>) -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            database_url: None,
            max_db_connections: 10,
            api_tokens,
            transition_policy: TransitionPolicy::default(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - ECOBURN_API_TOKENS (required, comma-separated)
    /// - ECOBURN_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - DATABASE_URL (optional, in-memory store when unset)
    /// - ECOBURN_DB_MAX_CONNECTIONS (optional, default: 10)
    /// - ECOBURN_TRANSITION_POLICY (optional, permissive | forward-only)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_tokens = std::env::var("ECOBURN_API_TOKENS")
            .map(|raw| parse_tokens(&raw))
            .map_err(|_| anyhow::anyhow!("ECOBURN_API_TOKENS environment variable not set"))?;

        let mut config = Self::new(api_tokens);

        if let Ok(addr) = std::env::var("ECOBURN_BIND_ADDR") {
            config.bind_addr = addr;
        }

        config.database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        config.max_db_connections = std::env::var("ECOBURN_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        if let Ok(policy) = std::env::var("ECOBURN_TRANSITION_POLICY") {
            config.transition_policy = policy.parse().map_err(anyhow::Error::msg)?;
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.api_tokens.is_empty() {
            anyhow::bail!("at least one API token must be configured");
        }

        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                anyhow::bail!("DATABASE_URL must start with postgres:// or postgresql://");
            }
        }

        if self.max_db_connections == 0 {
            anyhow::bail!("max_db_connections must be greater than 0");
        }

        Ok(())
    }
}

/// Split a comma-separated token list, dropping blanks
pub fn parse_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
