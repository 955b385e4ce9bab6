use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{create_club, list_clubs};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clubs))
        .route("/", post(create_club))
}
