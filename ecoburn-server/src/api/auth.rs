//! Bearer credential handling
//!
//! Turns the `Authorization` header into a [`SessionContext`]. A token that
//! is missing or not in the configured set yields an anonymous session, which
//! every service call rejects with `Unauthenticated`.

use std::collections::HashSet;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header::AUTHORIZATION, request::Parts};

use super::AppState;
use crate::service::SessionContext;

/// Accepted API tokens
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    tokens: HashSet<String>,
}

impl TokenSet {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Session for the given headers
    pub fn session_for(&self, headers: &HeaderMap) -> SessionContext {
        match extract_bearer_token(headers) {
            Some(token) if self.contains(&token) => SessionContext::authenticated(token),
            Some(_) => {
                tracing::debug!("Rejected unknown bearer token");
                SessionContext::anonymous()
            }
            None => SessionContext::anonymous(),
        }
    }
}

/// Token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.tokens.session_for(&parts.headers))
    }
}
