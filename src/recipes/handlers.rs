use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::ownership::ensure_owner;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::recipes::dto::{CreateRecipeRequest, Pagination};
use crate::recipes::repo::{self, NewRecipe, Recipe};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe))
        .route("/recipes/:id", delete(delete_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    Ok(Json(repo::list(&state.db, p.limit, p.offset).await?))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = repo::find_by_id(&state.db, recipe_id)
        .await?
        .ok_or(ApiError::NotFound("recipe"))?;
    Ok(Json(recipe))
}

#[instrument(skip(state, claims, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    claims: AuthUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title cannot be empty".into()));
    }
    if !(1..=3).contains(&payload.difficulty) {
        return Err(ApiError::Validation("difficulty must be 1-3".into()));
    }
    if !(1..=1000).contains(&payload.time_to_prepare) {
        return Err(ApiError::Validation(
            "time_to_prepare must be 1-1000 minutes".into(),
        ));
    }

    let recipe = repo::create(
        &state.db,
        NewRecipe {
            title: payload.title,
            tag_line: payload.tag_line,
            difficulty: payload.difficulty,
            time_to_prepare: payload.time_to_prepare,
            method: payload.method,
            recipe_img: payload.recipe_img,
            cuisine: payload.cuisine,
            user_id: claims.user_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

// Existence is checked before the credential so an unauthenticated probe of a
// missing id still sees 404, and ownership only after both.
#[instrument(skip(state, claims))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    claims: Result<AuthUser, ApiError>,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let recipe = repo::find_by_id(&state.db, recipe_id)
        .await?
        .ok_or(ApiError::NotFound("recipe"))?;

    let claims = claims?;
    ensure_owner(&claims, recipe.user_id)?;

    repo::delete(&state.db, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
