//! Session context
//!
//! The caller's credential, passed explicitly into every service call. The
//! HTTP layer decides whether a bearer token is valid; services only check
//! that a validated credential is present.

use super::{BurnJobError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    credential: Option<String>,
}

impl SessionContext {
    /// Session backed by a validated credential
    pub fn authenticated(credential: impl Into<String>) -> Self {
        Self {
            credential: Some(credential.into()),
        }
    }

    /// Session without a usable credential
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Fail with `Unauthenticated` unless a credential is present
    pub fn require(&self) -> Result<&str> {
        self.credential
            .as_deref()
            .ok_or(BurnJobError::Unauthenticated)
    }
}
