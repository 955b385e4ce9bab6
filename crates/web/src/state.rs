use storage::Database;

use crate::email::Mailer;
use crate::middleware::auth::AdminSessions;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: AdminSessions,
    pub mailer: Mailer,
    pub admin_password: String,
}
