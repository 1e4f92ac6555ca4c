//! Burn Job API Handlers
//!
//! HTTP endpoints for burn job records, progress views and bulk transitions.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use ecoburn_core::domain::burn_job::BurnJob;
use ecoburn_core::dto::bulk::{BulkTransitionForm, BulkTransitionResponse};
use ecoburn_core::dto::burn_job::{BurnJobView, CreateBurnJob, UpdateBurnJob};
use ecoburn_core::dto::summary::BurnSummary;
use uuid::Uuid;

use super::AppState;
use crate::api::error::ApiResult;
use crate::api::json::ApiJson;
use crate::service::{BurnJobError, SessionContext, bulk_service, burn_job_service};

// =============================================================================
// Burn Job Endpoints
// =============================================================================

/// GET /api/burn-jobs
/// List all burn jobs with their progress stages
pub async fn list_burn_jobs(
    State(state): State<AppState>,
    session: SessionContext,
) -> ApiResult<Json<Vec<BurnJobView>>> {
    tracing::debug!("Listing burn jobs");

    let jobs = burn_job_service::list_jobs(state.store.as_ref(), &session).await?;
    Ok(Json(jobs))
}

/// GET /api/burn-jobs/{id}
/// Get a burn job with its progress stages
pub async fn get_burn_job(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BurnJobView>> {
    tracing::debug!("Getting burn job: {}", id);

    let job = burn_job_service::get_job(state.store.as_ref(), &session, id).await?;
    Ok(Json(job))
}

/// POST /api/burn-jobs
/// Record a new burn job
pub async fn create_burn_job(
    State(state): State<AppState>,
    session: SessionContext,
    ApiJson(req): ApiJson<CreateBurnJob>,
) -> ApiResult<(StatusCode, Json<BurnJob>)> {
    let job = burn_job_service::create_job(state.store.as_ref(), &session, req).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/burn-jobs/{id}
/// Update fields of a burn job
pub async fn update_burn_job(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<Uuid>,
    ApiJson(patch): ApiJson<UpdateBurnJob>,
) -> ApiResult<Json<BurnJob>> {
    let job =
        burn_job_service::update_job(state.store.as_ref(), &session, state.policy, id, patch)
            .await?;
    Ok(Json(job))
}

/// DELETE /api/burn-jobs/{id}
/// Remove a burn job
pub async fn delete_burn_job(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    burn_job_service::delete_job(state.store.as_ref(), &session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/burn-jobs/summary
/// Totals for the burn report
pub async fn burn_summary(
    State(state): State<AppState>,
    session: SessionContext,
) -> ApiResult<Json<BurnSummary>> {
    let summary = burn_job_service::summary(state.store.as_ref(), &session).await?;
    Ok(Json(summary))
}

// =============================================================================
// Bulk Transition Endpoint
// =============================================================================

/// POST /api/burn-jobs/bulk-update
/// Set one status on every burn job created inside a date/time range
pub async fn bulk_update(
    State(state): State<AppState>,
    session: SessionContext,
    ApiJson(form): ApiJson<BulkTransitionForm>,
) -> ApiResult<Json<BulkTransitionResponse>> {
    // Credential is checked before the range is parsed
    session.require()?;

    let req = form.into_request().map_err(BurnJobError::from)?;
    tracing::info!(
        "Bulk transition requested: {:?} .. {:?} -> {}",
        req.range_start,
        req.range_end,
        req.target_status
    );

    let report =
        bulk_service::apply_bulk_transition(state.store.as_ref(), &session, state.policy, &req)
            .await?;

    Ok(Json(BulkTransitionResponse::new(report, req.target_status)))
}
