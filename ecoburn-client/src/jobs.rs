//! Burn job API endpoints

use crate::EcoBurnClient;
use crate::error::Result;
use ecoburn_core::domain::burn_job::BurnJob;
use ecoburn_core::domain::status::BurnStatus;
use ecoburn_core::dto::bulk::{BulkTransitionForm, BulkTransitionResponse};
use ecoburn_core::dto::burn_job::{BurnJobView, CreateBurnJob, UpdateBurnJob};
use ecoburn_core::dto::summary::BurnSummary;
use reqwest::Method;
use uuid::Uuid;

impl EcoBurnClient {
    // =============================================================================
    // Burn Job Records
    // =============================================================================

    /// List all burn jobs with their progress stages, newest first
    pub async fn list_burn_jobs(&self) -> Result<Vec<BurnJobView>> {
        let response = self.authed(Method::GET, "/api/burn-jobs")?.send().await?;

        self.handle_response(response).await
    }

    /// Get a burn job with its progress stages
    ///
    /// # Arguments
    /// * `id` - The burn job UUID
    pub async fn get_burn_job(&self, id: Uuid) -> Result<BurnJobView> {
        let response = self
            .authed(Method::GET, &format!("/api/burn-jobs/{}", id))?
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Record a new burn job
    ///
    /// # Example
    /// ```no_run
    /// # use ecoburn_client::EcoBurnClient;
    /// # use ecoburn_core::dto::burn_job::CreateBurnJob;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = EcoBurnClient::new("http://localhost:8080").with_token("admin-token");
    /// let job = client.create_burn_job(CreateBurnJob {
    ///     subject_name: Some("Ahmad Rizki".to_string()),
    ///     weight_kg: 25.0,
    ///     ..Default::default()
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_burn_job(&self, req: CreateBurnJob) -> Result<BurnJob> {
        let response = self
            .authed(Method::POST, "/api/burn-jobs")?
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Apply a field patch to a burn job
    pub async fn update_burn_job(&self, id: Uuid, patch: &UpdateBurnJob) -> Result<BurnJob> {
        let response = self
            .authed(Method::PUT, &format!("/api/burn-jobs/{}", id))?
            .json(patch)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Set the status of a single burn job
    pub async fn set_status(&self, id: Uuid, status: BurnStatus) -> Result<BurnJob> {
        self.update_burn_job(id, &UpdateBurnJob::status(status))
            .await
    }

    /// Remove a burn job
    pub async fn delete_burn_job(&self, id: Uuid) -> Result<()> {
        let response = self
            .authed(Method::DELETE, &format!("/api/burn-jobs/{}", id))?
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Totals for the burn report
    pub async fn summary(&self) -> Result<BurnSummary> {
        let response = self
            .authed(Method::GET, "/api/burn-jobs/summary")?
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Bulk Transitions
    // =============================================================================

    /// Set one status on every burn job created inside a date/time range
    ///
    /// A rejected range comes back as [`crate::ClientError::ApiError`] with
    /// the server's message.
    pub async fn bulk_update(&self, form: BulkTransitionForm) -> Result<BulkTransitionResponse> {
        let response = self
            .authed(Method::POST, "/api/burn-jobs/bulk-update")?
            .json(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
