use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    list_registrations, login, logout, recalculate_all, recalculate_missing,
};
use crate::middleware::auth::{AdminSessions, require_auth};
use crate::state::AppState;

pub fn routes(sessions: AdminSessions) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/registrations", get(list_registrations))
        .route("/recalculate-fields", post(recalculate_missing))
        .route("/recalculate-all-fields", post(recalculate_all))
        .route_layer(middleware::from_fn_with_state(sessions, require_auth));

    Router::new().route("/login", post(login)).merge(protected)
}
