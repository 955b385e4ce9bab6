use sqlx::PgPool;

use crate::error::Result;
use crate::repository::registration::RegistrationRepository;
use crate::services::classification::classify;

/// Which rows the batch reclassification touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecalculationScope {
    /// Only rows whose derived flags were never computed.
    Selective,
    /// Every row, overwriting existing flags.
    Full,
}

/// Recompute the derived flags for stored registrations and persist them.
///
/// Each row is independent: a failed update is logged and skipped, and the
/// returned count covers successful updates only. Re-running over the same
/// data yields the same flags.
pub async fn recalculate(pool: &PgPool, scope: RecalculationScope) -> Result<u64> {
    let repo = RegistrationRepository::new(pool);
    let rows = repo.rows_for_recalculation(scope).await?;

    tracing::info!(scope = ?scope, rows = rows.len(), "recalculating derived flags");

    let mut updated = 0u64;

    for row in rows {
        let athlete1 = row.athlete1_profile();
        let athlete2 = row.athlete2_profile();

        let flags = classify(
            &athlete1,
            athlete2.as_ref(),
            row.athlete1_club_name.as_deref(),
            row.athlete2_club_name.as_deref(),
            row.is_pair,
        );

        match repo.update_derived_flags(row.id, &flags).await {
            Ok(()) => updated += 1,
            Err(e) => {
                tracing::warn!(
                    registration_id = row.id,
                    error = %e,
                    "skipping registration: failed to persist derived flags"
                );
            }
        }
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn stored_flags(repo: &RegistrationRepository<'_>) -> Vec<(i64, Option<bool>, Option<bool>, Option<bool>)> {
        repo.list_detailed()
            .await
            .unwrap()
            .into_iter()
            .map(|row| (row.id, row.etranger, row.mosaique, row.mixte))
            .collect()
    }

    #[tokio::test]
    #[ignore] // Only run against a live database
    async fn full_recalculation_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&url)
            .await
            .expect("Failed to connect to database");
        let repo = RegistrationRepository::new(&pool);

        recalculate(&pool, RecalculationScope::Full).await.unwrap();
        let first = stored_flags(&repo).await;

        recalculate(&pool, RecalculationScope::Full).await.unwrap();
        let second = stored_flags(&repo).await;

        assert_eq!(first, second);
    }
}
