//! Bulk Transition Service
//!
//! Sets one status on every burn job created inside a time range. Rows are
//! updated one at a time; a row that fails is recorded in the report and the
//! batch carries on.

use chrono::{DateTime, Utc};
use ecoburn_core::domain::status::TransitionPolicy;
use ecoburn_core::dto::bulk::{BulkTransitionReport, BulkTransitionRequest};
use ecoburn_core::dto::burn_job::UpdateBurnJob;

use super::{Result, SessionContext};
use crate::repository::BurnJobStore;

/// Apply a bulk transition, stamping every updated job with the current time
pub async fn apply_bulk_transition(
    store: &dyn BurnJobStore,
    session: &SessionContext,
    policy: TransitionPolicy,
    req: &BulkTransitionRequest,
) -> Result<BulkTransitionReport> {
    apply_bulk_transition_at(store, session, policy, req, Utc::now()).await
}

/// Apply a bulk transition, stamping every updated job with `now`
///
/// Fails with `Unauthenticated` or `InvalidRange` before touching the store.
/// Everything after validation is reported, not raised.
pub async fn apply_bulk_transition_at(
    store: &dyn BurnJobStore,
    session: &SessionContext,
    policy: TransitionPolicy,
    req: &BulkTransitionRequest,
    now: DateTime<Utc>,
) -> Result<BulkTransitionReport> {
    session.require()?;
    let (start, end) = req.validated_range()?;

    let matched = store.list_in_range(start, end).await?;
    let patch = UpdateBurnJob::status(req.target_status);

    let mut report = BulkTransitionReport {
        matched_count: matched.len(),
        ..Default::default()
    };

    for job in matched {
        match store.update(job.id, &patch, policy, now).await {
            Ok(_) => report.updated_count += 1,
            Err(err) => {
                tracing::warn!("Bulk transition failed for job {}: {}", job.id, err);
                report.failed_ids.push(job.id);
            }
        }
    }

    tracing::info!(
        "Bulk transition [{} .. {}] -> {}: matched {}, updated {}, failed {}",
        start,
        end,
        req.target_status,
        report.matched_count,
        report.updated_count,
        report.failed_ids.len()
    );

    Ok(report)
}
