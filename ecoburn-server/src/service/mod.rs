//! Service Module
//!
//! Business logic layer. Services sit between the HTTP handlers and the
//! [`BurnJobStore`](crate::repository::BurnJobStore) and take the caller's
//! session explicitly on every call.

pub mod bulk;
pub mod burn_job;
pub mod session;

use ecoburn_core::domain::status::BurnStatus;
use ecoburn_core::dto::bulk::RangeError;
use thiserror::Error;
use uuid::Uuid;

use crate::repository::StoreError;

// Re-export for convenience
pub use bulk as bulk_service;
pub use burn_job as burn_job_service;
pub use session::SessionContext;

/// Service error type
#[derive(Debug, Error)]
pub enum BurnJobError {
    #[error("burn job {0} not found")]
    NotFound(Uuid),

    #[error("invalid range: {0}")]
    InvalidRange(#[from] RangeError),

    #[error("missing or invalid credential")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("burn job {id} cannot move from {from} to {to}")]
    TransitionRejected {
        id: Uuid,
        from: BurnStatus,
        to: BurnStatus,
    },

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<StoreError> for BurnJobError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => BurnJobError::NotFound(id),
            StoreError::TransitionRejected { id, from, to } => {
                BurnJobError::TransitionRejected { id, from, to }
            }
            StoreError::Database(err) => BurnJobError::Database(err),
        }
    }
}

impl BurnJobError {
    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            BurnJobError::NotFound(_) => "not_found",
            BurnJobError::InvalidRange(_) => "invalid_range",
            BurnJobError::Unauthenticated => "unauthenticated",
            BurnJobError::Validation(_) => "validation",
            BurnJobError::TransitionRejected { .. } => "transition_rejected",
            BurnJobError::Database(_) => "database",
        }
    }
}

pub type Result<T> = std::result::Result<T, BurnJobError>;
