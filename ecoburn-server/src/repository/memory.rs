//! In-memory burn job store
//!
//! Keeps jobs in insertion order behind a tokio `RwLock`. Used when no
//! database is configured and throughout the tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ecoburn_core::domain::burn_job::BurnJob;
use ecoburn_core::domain::status::TransitionPolicy;
use ecoburn_core::dto::burn_job::{CreateBurnJob, UpdateBurnJob};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BurnJobStore, StoreError, check_transition};

#[derive(Debug, Default)]
pub struct MemoryStore {
    jobs: RwLock<Vec<BurnJob>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with existing records, kept in the given order
    pub fn with_jobs(jobs: Vec<BurnJob>) -> Self {
        Self {
            jobs: RwLock::new(jobs),
        }
    }

    /// Copy of every record in insertion order
    pub async fn snapshot(&self) -> Vec<BurnJob> {
        self.jobs.read().await.clone()
    }
}

#[async_trait]
impl BurnJobStore for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<BurnJob, StoreError> {
        self.jobs
            .read()
            .await
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, req: CreateBurnJob) -> Result<BurnJob, StoreError> {
        let job = req.into_job(Uuid::new_v4(), Utc::now());
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateBurnJob,
        policy: TransitionPolicy,
        at: DateTime<Utc>,
    ) -> Result<BurnJob, StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or(StoreError::NotFound(id))?;

        check_transition(policy, job, patch)?;
        patch.apply_to(job, at);
        Ok(job.clone())
    }

    async fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BurnJob>, StoreError> {
        Ok(self
            .jobs
            .read()
            .await
            .iter()
            .filter(|job| job.created_within(start, end))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<BurnJob>, StoreError> {
        let mut jobs = self.jobs.read().await.clone();
        // Stable sort: equal timestamps keep insertion order
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let index = jobs
            .iter()
            .position(|job| job.id == id)
            .ok_or(StoreError::NotFound(id))?;
        jobs.remove(index);
        Ok(())
    }
}
