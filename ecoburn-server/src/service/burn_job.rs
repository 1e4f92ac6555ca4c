//! Burn Job Service
//!
//! Field-level CRUD over burn jobs, listing with derived progress, and the
//! report summary.

use chrono::Utc;
use ecoburn_core::domain::burn_job::BurnJob;
use ecoburn_core::domain::status::TransitionPolicy;
use ecoburn_core::dto::burn_job::{BurnJobView, CreateBurnJob, UpdateBurnJob};
use ecoburn_core::dto::summary::BurnSummary;
use uuid::Uuid;

use super::{BurnJobError, Result, SessionContext};
use crate::repository::BurnJobStore;

/// List every job with its progress timeline, newest first
pub async fn list_jobs(
    store: &dyn BurnJobStore,
    session: &SessionContext,
) -> Result<Vec<BurnJobView>> {
    session.require()?;

    let jobs = store.list().await?;
    Ok(jobs.into_iter().map(BurnJobView::from).collect())
}

/// Get a job by ID
pub async fn get_job(
    store: &dyn BurnJobStore,
    session: &SessionContext,
    id: Uuid,
) -> Result<BurnJobView> {
    session.require()?;

    let job = store.get(id).await?;
    Ok(job.into())
}

/// Record a new job
pub async fn create_job(
    store: &dyn BurnJobStore,
    session: &SessionContext,
    req: CreateBurnJob,
) -> Result<BurnJob> {
    session.require()?;
    req.validate().map_err(BurnJobError::Validation)?;

    let job = store.create(req).await?;

    tracing::info!(
        "Burn job created: {} ({} kg, {})",
        job.id,
        job.weight_kg,
        job.status
    );

    Ok(job)
}

/// Apply a field patch to a job
///
/// Under [`TransitionPolicy::ForwardOnly`] a status change that moves the job
/// backwards is rejected by the store before anything is written.
pub async fn update_job(
    store: &dyn BurnJobStore,
    session: &SessionContext,
    policy: TransitionPolicy,
    id: Uuid,
    patch: UpdateBurnJob,
) -> Result<BurnJob> {
    session.require()?;
    patch.validate().map_err(BurnJobError::Validation)?;

    let job = store.update(id, &patch, policy, Utc::now()).await?;

    tracing::info!("Burn job {} updated (status: {})", job.id, job.status);

    Ok(job)
}

/// Remove a job
pub async fn delete_job(
    store: &dyn BurnJobStore,
    session: &SessionContext,
    id: Uuid,
) -> Result<()> {
    session.require()?;

    store.delete(id).await?;
    tracing::info!("Burn job {} deleted", id);

    Ok(())
}

/// Totals for the burn report
pub async fn summary(store: &dyn BurnJobStore, session: &SessionContext) -> Result<BurnSummary> {
    session.require()?;

    let jobs = store.list().await?;
    Ok(BurnSummary::from_jobs(&jobs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use ecoburn_core::domain::burn_job::{BurnKind, WALK_IN_SUBJECT};
    use ecoburn_core::domain::stage::StageLabel;
    use ecoburn_core::domain::status::BurnStatus;

    fn session() -> SessionContext {
        SessionContext::authenticated("admin-token")
    }

    async fn seeded(store: &MemoryStore, status: BurnStatus) -> BurnJob {
        create_job(
            store,
            &session(),
            CreateBurnJob {
                subject_name: Some("Eko Prasetyo".to_string()),
                weight_kg: 15.0,
                status: Some(status),
                burn_kind: BurnKind::OneTime,
                amount_paid: Some(50_000),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_session_is_rejected() {
        let store = MemoryStore::new();
        let anon = SessionContext::anonymous();

        assert!(matches!(
            list_jobs(&store, &anon).await,
            Err(BurnJobError::Unauthenticated)
        ));
        assert!(matches!(
            create_job(
                &store,
                &anon,
                CreateBurnJob {
                    weight_kg: 1.0,
                    ..Default::default()
                }
            )
            .await,
            Err(BurnJobError::Unauthenticated)
        ));
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_applies_walk_in_fallback() {
        let store = MemoryStore::new();
        let job = create_job(
            &store,
            &session(),
            CreateBurnJob {
                weight_kg: 12.5,
                burn_kind: BurnKind::OneTime,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(job.subject_name, WALK_IN_SUBJECT);
        assert_eq!(job.status, BurnStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_weight() {
        let store = MemoryStore::new();
        let result = create_job(
            &store,
            &session(),
            CreateBurnJob {
                weight_kg: -3.0,
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(result, Err(BurnJobError::Validation(_))));
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_job_includes_progress() {
        let store = MemoryStore::new();
        let job = seeded(&store, BurnStatus::Processing).await;

        let view = get_job(&store, &session(), job.id).await.unwrap();
        assert_eq!(view.job.id, job.id);
        assert_eq!(view.progress[1].label, StageLabel::Preparation);
        assert_eq!(view.progress[1].timestamp, Some(job.updated_at));
        assert!(!view.progress[3].completed);
    }

    #[tokio::test]
    async fn test_get_missing_job() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            get_job(&store, &session(), id).await,
            Err(BurnJobError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_permissive_policy_allows_any_transition() {
        let store = MemoryStore::new();
        let job = seeded(&store, BurnStatus::Completed).await;

        let updated = update_job(
            &store,
            &session(),
            TransitionPolicy::Permissive,
            job.id,
            UpdateBurnJob::status(BurnStatus::Pending),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, BurnStatus::Pending);
    }

    #[tokio::test]
    async fn test_forward_only_policy_rejects_backwards_move() {
        let store = MemoryStore::new();
        let job = seeded(&store, BurnStatus::Completed).await;

        let result = update_job(
            &store,
            &session(),
            TransitionPolicy::ForwardOnly,
            job.id,
            UpdateBurnJob::status(BurnStatus::Processing),
        )
        .await;

        assert!(matches!(
            result,
            Err(BurnJobError::TransitionRejected {
                from: BurnStatus::Completed,
                to: BurnStatus::Processing,
                ..
            })
        ));
        assert_eq!(store.get(job.id).await.unwrap(), job);
    }

    #[tokio::test]
    async fn test_update_without_status_skips_policy() {
        let store = MemoryStore::new();
        let job = seeded(&store, BurnStatus::Completed).await;

        let updated = update_job(
            &store,
            &session(),
            TransitionPolicy::ForwardOnly,
            job.id,
            UpdateBurnJob {
                weight_kg: Some(16.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.weight_kg, 16.0);
        assert_eq!(updated.updated_at, job.updated_at);
    }

    #[tokio::test]
    async fn test_delete_and_summary() {
        let store = MemoryStore::new();
        let a = seeded(&store, BurnStatus::Completed).await;
        seeded(&store, BurnStatus::Processing).await;

        let before = summary(&store, &session()).await.unwrap();
        assert_eq!(before.job_count, 2);
        assert_eq!(before.total_weight_kg, 30.0);

        delete_job(&store, &session(), a.id).await.unwrap();

        let after = summary(&store, &session()).await.unwrap();
        assert_eq!(after.job_count, 1);
        assert_eq!(after.completed_count, 0);
        assert_eq!(after.processing_count, 1);
    }
}
