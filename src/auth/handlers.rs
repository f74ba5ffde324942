use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{instrument, warn};

use crate::auth::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::auth::service::NewProfile;
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]{3,32}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();

    if !is_valid_username(&payload.username) {
        warn!(username = %payload.username, "invalid username");
        return Err(ApiError::Validation(
            "username must be 3-32 characters of letters, digits, _ or -".into(),
        ));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("password too short".into()));
    }

    let logged_in = state
        .auth
        .register(NewProfile {
            username: payload.username,
            name: payload.name,
            profile_img: payload.profile_img,
            password: payload.password,
            bio: payload.bio,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: logged_in.user_id,
            username: logged_in.username,
            token: logged_in.token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let logged_in = state
        .auth
        .login(payload.username.trim(), &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        user_id: logged_in.user_id,
        username: logged_in.username,
        token: logged_in.token,
    }))
}
