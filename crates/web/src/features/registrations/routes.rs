use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{check_email, check_phone, submit_registration};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/registrations", post(submit_registration))
        .route("/check-email", get(check_email))
        .route("/check-phone", get(check_phone))
}
