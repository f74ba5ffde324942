use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for the API. Every handler and service path returns one
/// of these; nothing is collapsed into a catch-all success.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("user not found")]
    UserNotFound,

    #[error("invalid password")]
    InvalidCredentials,

    #[error("invalid token")]
    TokenInvalid,

    #[error("token expired")]
    TokenExpired,

    #[error("no credential presented")]
    Unauthenticated,

    #[error("not the resource owner")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateUsername(_) => StatusCode::CONFLICT,
            ApiError::UserNotFound
            | ApiError::InvalidCredentials
            | ApiError::TokenInvalid
            | ApiError::TokenExpired
            | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreUnavailable(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message. Unknown-user and wrong-password render the same
    /// body so login responses cannot be used to enumerate usernames; the
    /// variants stay distinct for logging.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::DuplicateUsername(_) => "username already taken".into(),
            ApiError::UserNotFound | ApiError::InvalidCredentials => {
                "invalid username or password".into()
            }
            ApiError::TokenInvalid => "invalid token".into(),
            ApiError::TokenExpired => "token expired".into(),
            ApiError::Unauthenticated => "missing Authorization header".into(),
            ApiError::Forbidden => "forbidden".into(),
            ApiError::NotFound(what) => format!("{what} not found"),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::StoreUnavailable(_) | ApiError::Internal(_) => {
                "internal server error".into()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
