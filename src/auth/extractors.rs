use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;

/// The claim set trusted for the duration of one request, extracted from a
/// validated bearer token. This extractor is the only way to obtain one;
/// never build it from unauthenticated input.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        // A missing or malformed header is an absent credential, distinct
        // from a presented-but-rejected one.
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthenticated)?;

        let claims = keys.verify(token)?;
        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.unique_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http;
    use time::{Duration, OffsetDateTime};

    use super::*;
    use crate::auth::jwt::TOKEN_TTL;
    use crate::config::JwtConfig;

    #[derive(Clone)]
    struct TestState {
        keys: JwtKeys,
    }

    impl FromRef<TestState> for JwtKeys {
        fn from_ref(state: &TestState) -> Self {
            state.keys.clone()
        }
    }

    fn test_state() -> TestState {
        TestState {
            keys: JwtKeys::new(&JwtConfig {
                secret: "extractor-secret".into(),
                issuer: "iss".into(),
                audience: "aud".into(),
            }),
        }
    }

    fn parts(auth_header: Option<&str>) -> Parts {
        let mut builder = http::Request::builder().uri("/api/v1/me");
        if let Some(value) = auth_header {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_an_absent_credential() {
        let state = test_state();
        let err = AuthUser::from_request_parts(&mut parts(None), &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_an_absent_credential() {
        let state = test_state();
        let err = AuthUser::from_request_parts(&mut parts(Some("Basic abc123")), &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn valid_token_yields_the_embedded_claims() {
        let state = test_state();
        let token = state
            .keys
            .issue(9, "carol", OffsetDateTime::now_utc())
            .unwrap();
        let user = AuthUser::from_request_parts(
            &mut parts(Some(&format!("Bearer {token}"))),
            &state,
        )
        .await
        .expect("extraction succeeds");
        assert_eq!(user.user_id, 9);
        assert_eq!(user.username, "carol");
    }

    #[tokio::test]
    async fn tampered_token_is_invalid_not_absent() {
        let state = test_state();
        let mut token = state
            .keys
            .issue(9, "carol", OffsetDateTime::now_utc())
            .unwrap();
        token.push('x');
        let err = AuthUser::from_request_parts(&mut parts(Some(&format!("Bearer {token}"))), &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::TokenInvalid));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let state = test_state();
        let issued = OffsetDateTime::now_utc() - TOKEN_TTL - Duration::minutes(5);
        let token = state.keys.issue(9, "carol", issued).unwrap();
        let err = AuthUser::from_request_parts(&mut parts(Some(&format!("Bearer {token}"))), &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::TokenExpired));
    }
}
