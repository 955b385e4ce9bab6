use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::club::{ClubResponse, CreateClubRequest};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/clubs",
    responses(
        (status = 200, description = "List clubs, excluding the hidden Open club", body = Vec<ClubResponse>)
    ),
    tag = "clubs"
)]
pub async fn list_clubs(State(state): State<AppState>) -> Result<Response, WebError> {
    let clubs = services::list_clubs(state.db.pool()).await?;

    let response: Vec<ClubResponse> = clubs.into_iter().map(ClubResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/clubs",
    request_body = CreateClubRequest,
    responses(
        (status = 201, description = "Club created (or already existed)", body = ClubResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "clubs"
)]
pub async fn create_club(
    State(state): State<AppState>,
    Json(req): Json<CreateClubRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let club = services::create_club(state.db.pool(), &req.name).await?;

    Ok((StatusCode::CREATED, Json(ClubResponse::from(club))).into_response())
}
