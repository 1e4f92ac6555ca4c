//! Postgres burn job store
//!
//! Maps burn jobs onto the `burn_jobs` table created by [`crate::db::run_migrations`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ecoburn_core::domain::burn_job::{BurnJob, BurnKind};
use ecoburn_core::domain::status::{BurnStatus, TransitionPolicy};
use ecoburn_core::dto::burn_job::{CreateBurnJob, UpdateBurnJob};
use sqlx::PgPool;
use uuid::Uuid;

use super::{BurnJobStore, StoreError, check_transition};

const SELECT_COLUMNS: &str = r#"
    SELECT id, subject_name, weight_kg, status, kiln_name, burn_kind,
           amount_paid, created_at, updated_at
    FROM burn_jobs
"#;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BurnJobStore for PgStore {
    async fn get(&self, id: Uuid) -> Result<BurnJob, StoreError> {
        let row = sqlx::query_as::<_, BurnJobRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or(StoreError::NotFound(id))?;
        Ok(BurnJob::try_from(row)?)
    }

    async fn create(&self, req: CreateBurnJob) -> Result<BurnJob, StoreError> {
        let job = req.into_job(Uuid::new_v4(), Utc::now());

        sqlx::query(
            r#"
            INSERT INTO burn_jobs (id, subject_name, weight_kg, status, kiln_name,
                                   burn_kind, amount_paid, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(job.id)
        .bind(&job.subject_name)
        .bind(job.weight_kg)
        .bind(job.status.as_str())
        .bind(&job.kiln_name)
        .bind(job.burn_kind.as_str())
        .bind(job.amount_paid)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(job)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateBurnJob,
        policy: TransitionPolicy,
        at: DateTime<Utc>,
    ) -> Result<BurnJob, StoreError> {
        // Row lock for the read-modify-write; the record is written whole or not at all
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BurnJobRow>(&format!(
            "{SELECT_COLUMNS} WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut job = BurnJob::try_from(row.ok_or(StoreError::NotFound(id))?)?;

        // Dropping `tx` on rejection rolls back and releases the row lock
        check_transition(policy, &job, patch)?;
        patch.apply_to(&mut job, at);

        sqlx::query(
            r#"
            UPDATE burn_jobs
            SET subject_name = $1, weight_kg = $2, status = $3, kiln_name = $4,
                burn_kind = $5, amount_paid = $6, updated_at = $7
            WHERE id = $8
            "#,
        )
        .bind(&job.subject_name)
        .bind(job.weight_kg)
        .bind(job.status.as_str())
        .bind(&job.kiln_name)
        .bind(job.burn_kind.as_str())
        .bind(job.amount_paid)
        .bind(job.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(job)
    }

    async fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BurnJob>, StoreError> {
        let rows = sqlx::query_as::<_, BurnJobRow>(&format!(
            "{SELECT_COLUMNS} WHERE created_at >= $1 AND created_at <= $2 ORDER BY created_at ASC"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(BurnJob::try_from)
            .collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn list(&self) -> Result<Vec<BurnJob>, StoreError> {
        let rows = sqlx::query_as::<_, BurnJobRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(BurnJob::try_from)
            .collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM burn_jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct BurnJobRow {
    id: Uuid,
    subject_name: String,
    weight_kg: f64,
    status: String,
    kiln_name: Option<String>,
    burn_kind: String,
    amount_paid: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BurnJobRow> for BurnJob {
    type Error = sqlx::Error;

    /// Fails with a decode error when a stored enum string is not recognised
    fn try_from(row: BurnJobRow) -> Result<Self, Self::Error> {
        let status: BurnStatus = row.status.parse().map_err(|err| {
            tracing::error!("Burn job {} has unknown status '{}'", row.id, row.status);
            sqlx::Error::Decode(Box::new(err))
        })?;
        let burn_kind: BurnKind = row.burn_kind.parse().map_err(|err: String| {
            tracing::error!("Burn job {} has unknown kind '{}'", row.id, row.burn_kind);
            sqlx::Error::Decode(err.into())
        })?;

        Ok(BurnJob {
            id: row.id,
            subject_name: row.subject_name,
            weight_kg: row.weight_kg,
            status,
            kiln_name: row.kiln_name,
            burn_kind,
            amount_paid: row.amount_paid,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
