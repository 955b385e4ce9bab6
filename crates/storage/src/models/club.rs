use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Sentinel club standing for "no formal affiliation". Created lazily on
/// first reference and hidden from the public club listing.
pub const OPEN_CLUB_NAME: &str = "Open";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Club {
    pub id: i64,
    pub name: String,
}
