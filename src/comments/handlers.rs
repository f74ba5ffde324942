use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::ownership::ensure_owner;
use crate::auth::AuthUser;
use crate::comments::dto::{CreateCommentRequest, EditCommentRequest};
use crate::comments::repo::{self, Comment};
use crate::error::ApiError;
use crate::recipes;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/recipes/:id/comments", get(list_comments))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(create_comment))
        .route(
            "/comments/:id",
            patch(update_comment).delete(delete_comment),
        )
}

#[instrument(skip(state, claims, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    claims: AuthUser,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let text = payload.comment.trim();
    if text.is_empty() {
        return Err(ApiError::Validation("comment cannot be empty".into()));
    }

    recipes::repo::find_by_id(&state.db, payload.recipe_id)
        .await?
        .ok_or(ApiError::NotFound("recipe"))?;

    // Author facts come from the validated claims, never the request body.
    let comment = repo::create(
        &state.db,
        payload.recipe_id,
        claims.user_id,
        &claims.username,
        text,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    recipes::repo::find_by_id(&state.db, recipe_id)
        .await?
        .ok_or(ApiError::NotFound("recipe"))?;

    Ok(Json(repo::list_by_recipe(&state.db, recipe_id).await?))
}

// Mutations check existence first, then the credential, then ownership, so a
// probe of a missing id sees 404 whether or not it carries a token.
#[instrument(skip(state, claims, payload))]
pub async fn update_comment(
    State(state): State<AppState>,
    claims: Result<AuthUser, ApiError>,
    Path(comment_id): Path<i64>,
    Json(payload): Json<EditCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let existing = repo::find_by_id(&state.db, comment_id)
        .await?
        .ok_or(ApiError::NotFound("comment"))?;

    let claims = claims?;
    ensure_owner(&claims, existing.user_id)?;

    let text = payload.comment.trim();
    if text.is_empty() {
        return Err(ApiError::Validation("comment cannot be empty".into()));
    }

    let updated = repo::update_text(&state.db, comment_id, text)
        .await?
        .ok_or(ApiError::NotFound("comment"))?;
    Ok(Json(updated))
}

#[instrument(skip(state, claims))]
pub async fn delete_comment(
    State(state): State<AppState>,
    claims: Result<AuthUser, ApiError>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existing = repo::find_by_id(&state.db, comment_id)
        .await?
        .ok_or(ApiError::NotFound("comment"))?;

    let claims = claims?;
    ensure_owner(&claims, existing.user_id)?;

    repo::delete(&state.db, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
