use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storage::dto::registration::{
    CreateRegistrationRequest, ExistsResponse, RegistrationCreatedResponse,
};
use utoipa::IntoParams;
use validator::Validate;

use crate::email::{self, Recipient};
use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PhoneQuery {
    pub phone: String,
}

#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = CreateRegistrationRequest,
    responses(
        (status = 201, description = "Registration recorded", body = RegistrationCreatedResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "registrations"
)]
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(req): Json<CreateRegistrationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let id = services::submit_registration(state.db.pool(), &req).await?;

    tracing::info!(registration_id = id, is_pair = req.is_pair, "registration recorded");

    let response = RegistrationCreatedResponse {
        success: true,
        registration_id: id,
        message: "Registration successful".to_string(),
    };

    // Confirmations go out on a detached task; their outcome never affects
    // the recorded registration.
    let locale = req.locale_or_default().to_string();
    let athlete1 = Recipient {
        first_name: req.athlete1.first_name.clone(),
        last_name: req.athlete1.last_name.clone(),
        email: req.athlete1.email.clone(),
        locale: locale.clone(),
    };
    let athlete2 = req.partner().map(|partner| Recipient {
        first_name: partner.first_name.clone(),
        last_name: partner.last_name.clone(),
        email: partner.email.clone(),
        locale,
    });
    email::dispatch_confirmations(state.mailer.clone(), athlete1, athlete2);

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/check-email",
    params(EmailQuery),
    responses(
        (status = 200, description = "Whether the email appears on any registration", body = ExistsResponse)
    ),
    tag = "registrations"
)]
pub async fn check_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Response, WebError> {
    if query.email.trim().is_empty() {
        return Err(WebError::BadRequest("Email is required".to_string()));
    }

    let exists = services::email_exists(state.db.pool(), &query.email).await?;

    Ok(Json(ExistsResponse { exists }).into_response())
}

#[utoipa::path(
    get,
    path = "/api/check-phone",
    params(PhoneQuery),
    responses(
        (status = 200, description = "Whether the phone appears on any registration", body = ExistsResponse)
    ),
    tag = "registrations"
)]
pub async fn check_phone(
    State(state): State<AppState>,
    Query(query): Query<PhoneQuery>,
) -> Result<Response, WebError> {
    if query.phone.trim().is_empty() {
        return Err(WebError::BadRequest("Phone is required".to_string()));
    }

    let exists = services::phone_exists(state.db.pool(), &query.phone).await?;

    Ok(Json(ExistsResponse { exists }).into_response())
}
