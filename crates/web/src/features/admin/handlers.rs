use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use storage::dto::registration::{AdminRegistrationResponse, RecalculationResponse};
use utoipa::ToSchema;

use crate::error::WebError;
use crate::middleware::auth::bearer_token;
use crate::state::AppState;

use super::services;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Wrong password")
    ),
    tag = "admin"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    if req.password != state.admin_password {
        tracing::warn!("failed admin login attempt");
        return Err(WebError::Unauthorized);
    }

    let token = state.sessions.issue();

    Ok(Json(LoginResponse {
        success: true,
        token,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token revoked"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, WebError> {
    // require_auth already validated the token; revoke it now.
    if let Some(token) = bearer_token(&headers) {
        state.sessions.revoke(token);
    }

    Ok(Json(json!({ "success": true })).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/registrations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All registrations with club names", body = Vec<AdminRegistrationResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn list_registrations(State(state): State<AppState>) -> Result<Response, WebError> {
    let registrations = services::list_registrations(state.db.pool()).await?;

    Ok(Json(registrations).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/recalculate-fields",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Derived flags backfilled on rows missing them", body = RecalculationResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn recalculate_missing(State(state): State<AppState>) -> Result<Response, WebError> {
    let updated_count = services::recalculate_missing(state.db.pool()).await?;

    Ok(Json(RecalculationResponse {
        success: true,
        message: format!("Recalculated fields for {updated_count} registrations"),
        updated_count,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/recalculate-all-fields",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Derived flags recomputed on every row", body = RecalculationResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn recalculate_all(State(state): State<AppState>) -> Result<Response, WebError> {
    let updated_count = services::recalculate_all(state.db.pool()).await?;

    Ok(Json(RecalculationResponse {
        success: true,
        message: format!("Force recalculated fields for {updated_count} registrations"),
        updated_count,
    })
    .into_response())
}
