use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Process-lifetime store of opaque admin bearer tokens. Tokens live until
/// revoked by logout or the process exits.
#[derive(Clone, Default)]
pub struct AdminSessions {
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint and remember a fresh opaque token.
    pub fn issue(&self) -> String {
        let token = format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        );

        self.tokens
            .write()
            .expect("admin session lock poisoned")
            .insert(token.clone());

        token
    }

    pub fn validate(&self, token: &str) -> bool {
        self.tokens
            .read()
            .expect("admin session lock poisoned")
            .contains(token)
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.tokens
            .write()
            .expect("admin session lock poisoned")
            .remove(token)
    }
}

pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Gate for admin routes: a missing or unknown bearer token gets a bare 401.
pub async fn require_auth(
    State(sessions): State<AdminSessions>,
    req: Request,
    next: Next,
) -> Response {
    match bearer_token(req.headers()) {
        Some(token) if sessions.validate(token) => next.run(req).await,
        _ => {
            tracing::warn!("rejected admin request: missing or invalid token");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_validate_until_revoked() {
        let sessions = AdminSessions::new();

        let token = sessions.issue();
        assert!(sessions.validate(&token));

        assert!(sessions.revoke(&token));
        assert!(!sessions.validate(&token));
        assert!(!sessions.revoke(&token));
    }

    #[test]
    fn tokens_are_unique_and_opaque() {
        let sessions = AdminSessions::new();

        let a = sessions.issue();
        let b = sessions.issue();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn unknown_tokens_never_validate() {
        let sessions = AdminSessions::new();
        assert!(!sessions.validate("deadbeef"));
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = axum::http::HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc123"));

        headers.insert(header::AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
