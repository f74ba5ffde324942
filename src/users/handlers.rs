use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use tracing::instrument;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{
    PublicProfile, UpdateBioRequest, UpdateNameRequest, UpdateProfileImgRequest,
};
use crate::users::repo;

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/users/:id", get(get_user))
}

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/bio", patch(update_bio))
        .route("/me/name", patch(update_name))
        .route("/me/profile-img", patch(update_profile_img))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<PublicProfile>, ApiError> {
    let user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, claims))]
pub async fn get_me(
    State(state): State<AppState>,
    claims: AuthUser,
) -> Result<Json<PublicProfile>, ApiError> {
    let user = repo::find_by_id(&state.db, claims.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_bio(
    State(state): State<AppState>,
    claims: AuthUser,
    Json(payload): Json<UpdateBioRequest>,
) -> Result<Json<PublicProfile>, ApiError> {
    let user = repo::update_bio(&state.db, claims.user_id, &payload.bio)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_name(
    State(state): State<AppState>,
    claims: AuthUser,
    Json(payload): Json<UpdateNameRequest>,
) -> Result<Json<PublicProfile>, ApiError> {
    let user = repo::update_name(&state.db, claims.user_id, &payload.name)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, claims, payload))]
pub async fn update_profile_img(
    State(state): State<AppState>,
    claims: AuthUser,
    Json(payload): Json<UpdateProfileImgRequest>,
) -> Result<Json<PublicProfile>, ApiError> {
    let user = repo::update_profile_img(&state.db, claims.user_id, &payload.profile_img)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user.into()))
}
