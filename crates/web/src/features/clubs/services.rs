use sqlx::PgPool;
use storage::{error::Result, models::Club, repository::club::ClubRepository};

/// List clubs for the public picker (Open sentinel hidden)
pub async fn list_clubs(pool: &PgPool) -> Result<Vec<Club>> {
    let repo = ClubRepository::new(pool);
    repo.list_public().await
}

/// Add a club by name. Posting an existing name returns the existing row.
pub async fn create_club(pool: &PgPool, name: &str) -> Result<Club> {
    let repo = ClubRepository::new(pool);
    repo.create(name.trim()).await
}
