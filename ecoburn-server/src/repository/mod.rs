//! Repository Module
//!
//! Data access layer for the server. The [`BurnJobStore`] trait is the single
//! source of truth for burn job records; the in-memory and Postgres stores
//! implement it.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ecoburn_core::domain::burn_job::BurnJob;
use ecoburn_core::domain::status::{BurnStatus, TransitionPolicy};
use ecoburn_core::dto::burn_job::{CreateBurnJob, UpdateBurnJob};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("burn job {0} not found")]
    NotFound(Uuid),

    #[error("burn job {id} cannot move from {from} to {to}")]
    TransitionRejected {
        id: Uuid,
        from: BurnStatus,
        to: BurnStatus,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Reject a status change the policy forbids, judged against the stored row
///
/// Called by stores while they hold the row for writing.
pub(crate) fn check_transition(
    policy: TransitionPolicy,
    current: &BurnJob,
    patch: &UpdateBurnJob,
) -> Result<(), StoreError> {
    match patch.status {
        Some(to) if !policy.allows(current.status, to) => Err(StoreError::TransitionRejected {
            id: current.id,
            from: current.status,
            to,
        }),
        _ => Ok(()),
    }
}

/// Authoritative collection of burn jobs
///
/// Every call is complete on return: a record is either fully written or
/// untouched.
#[async_trait]
pub trait BurnJobStore: Send + Sync {
    /// Fetch a job by id
    async fn get(&self, id: Uuid) -> Result<BurnJob, StoreError>;

    /// Record a new job; `created_at` and `updated_at` are set to now
    async fn create(&self, req: CreateBurnJob) -> Result<BurnJob, StoreError>;

    /// Apply a patch; a patch carrying a status stamps `updated_at` with `at`
    ///
    /// The status change is checked against `policy` under the same lock as
    /// the write; a rejected patch leaves the row untouched.
    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateBurnJob,
        policy: TransitionPolicy,
        at: DateTime<Utc>,
    ) -> Result<BurnJob, StoreError>;

    /// Jobs whose `created_at` falls in `[start, end]`
    ///
    /// Each call reads a fresh snapshot.
    async fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BurnJob>, StoreError>;

    /// All jobs, newest first
    async fn list(&self) -> Result<Vec<BurnJob>, StoreError>;

    /// Remove a job
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
