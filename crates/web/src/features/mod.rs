pub mod admin;
pub mod clubs;
pub mod health;
pub mod registrations;

use axum::Router;

use crate::middleware::auth::AdminSessions;
use crate::state::AppState;

pub fn routes(sessions: AdminSessions) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(registrations::routes::routes())
        .nest("/clubs", clubs::routes::routes())
        .nest("/admin", admin::routes::routes(sessions))
}
