use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS burn_jobs (
            id UUID PRIMARY KEY,
            subject_name TEXT NOT NULL,
            weight_kg DOUBLE PRECISION NOT NULL CHECK (weight_kg >= 0),
            status VARCHAR(20) NOT NULL,
            kiln_name TEXT,
            burn_kind VARCHAR(20) NOT NULL DEFAULT 'subscription',
            amount_paid BIGINT CHECK (amount_paid >= 0),
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            CHECK (updated_at >= created_at)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Bulk transitions select by creation time
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_burn_jobs_created_at ON burn_jobs(created_at)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_burn_jobs_status ON burn_jobs(status)")
        .execute(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
