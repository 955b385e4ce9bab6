use sqlx::PgPool;
use storage::{
    dto::registration::AdminRegistrationResponse,
    error::Result,
    repository::registration::RegistrationRepository,
    services::recalculation::{self, RecalculationScope},
};

/// All registrations with club names joined, photos as data URIs.
pub async fn list_registrations(pool: &PgPool) -> Result<Vec<AdminRegistrationResponse>> {
    let rows = RegistrationRepository::new(pool).list_detailed().await?;

    Ok(rows.into_iter().map(AdminRegistrationResponse::from).collect())
}

/// Backfill flags on rows the classifier never touched.
pub async fn recalculate_missing(pool: &PgPool) -> Result<u64> {
    recalculation::recalculate(pool, RecalculationScope::Selective).await
}

/// Recompute flags on every row.
pub async fn recalculate_all(pool: &PgPool) -> Result<u64> {
    recalculation::recalculate(pool, RecalculationScope::Full).await
}
