use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{Club, OPEN_CLUB_NAME};

pub struct ClubRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClubRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List clubs for the public picker. The Open sentinel is hidden.
    pub async fn list_public(&self) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(
            "SELECT id, name FROM clubs WHERE name <> $1 ORDER BY name",
        )
        .bind(OPEN_CLUB_NAME)
        .fetch_all(self.pool)
        .await?;

        Ok(clubs)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>("SELECT id, name FROM clubs WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(club)
    }

    /// Club name for a stored id. A dangling id is not an error here: the
    /// registration simply has no resolvable club.
    pub async fn name_of(&self, id: i64) -> Result<Option<String>> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM clubs WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(name)
    }

    /// Create a club, returning the existing row when the name is already
    /// taken. A unique violation from a concurrent insert is recovered by
    /// re-fetching the winner.
    pub async fn create(&self, name: &str) -> Result<Club> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }

        match self.insert(name).await {
            Ok(club) => Ok(club),
            Err(e) if e.is_unique_violation() => self
                .find_by_name(name)
                .await?
                .ok_or(StorageError::NotFound),
            Err(e) => Err(e),
        }
    }

    /// Id of the Open sentinel club, creating it on first reference. Safe
    /// under concurrent first-time submissions: both callers end up with the
    /// same row.
    pub async fn resolve_open(&self) -> Result<i64> {
        let club = self.create(OPEN_CLUB_NAME).await?;
        Ok(club.id)
    }

    async fn insert(&self, name: &str) -> Result<Club> {
        let club = sqlx::query_as::<_, Club>(
            "INSERT INTO clubs (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(club)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connect() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        PgPool::connect(&url)
            .await
            .expect("Failed to connect to database")
    }

    #[tokio::test]
    #[ignore] // Only run against a live database
    async fn concurrent_open_resolution_yields_one_row() {
        let pool = connect().await;

        let (first, second) = tokio::join!(
            async { ClubRepository::new(&pool).resolve_open().await },
            async { ClubRepository::new(&pool).resolve_open().await },
        );

        assert_eq!(first.unwrap(), second.unwrap());

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clubs WHERE name = $1")
            .bind(OPEN_CLUB_NAME)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
