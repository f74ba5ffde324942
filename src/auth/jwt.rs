use axum::extract::FromRef;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::auth::claims::Claims;
use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Fixed token lifetime. Expiry is the only invalidation mechanism; there is
/// no server-side revocation record.
pub const TOKEN_TTL: Duration = Duration::minutes(30);

/// Signing and verification keys plus the issuer/audience pair baked into
/// every token. Constructed explicitly from config so tests can substitute
/// fixed keys.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
        }
    }

    /// Build and sign a token for the given identity, expiring `TOKEN_TTL`
    /// after `now`. No side effects beyond producing the string.
    pub fn issue(
        &self,
        user_id: i64,
        username: &str,
        now: OffsetDateTime,
    ) -> Result<String, ApiError> {
        let claims = Claims {
            sub: user_id,
            unique_name: username.to_owned(),
            iat: now.unix_timestamp(),
            exp: (now + TOKEN_TTL).unix_timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;
        debug!(user_id, username, "jwt signed");
        Ok(token)
    }

    /// Parse and verify a token, reconstructing its claims. Claims come
    /// strictly from the token payload; the user store is never consulted.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(user_id = data.claims.sub, "jwt verified");
                Ok(data.claims)
            }
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                Err(ApiError::TokenExpired)
            }
            Err(_) => Err(ApiError::TokenInvalid),
        }
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::new(&state.config.jwt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
        })
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let token = keys
            .issue(42, "alice", OffsetDateTime::now_utc())
            .expect("issue");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.unique_name, "alice");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL.whole_seconds());
    }

    #[test]
    fn verify_rejects_other_signing_key() {
        let keys = make_keys("key-one", "iss", "aud");
        let other = make_keys("key-two", "iss", "aud");
        let token = keys.issue(1, "alice", OffsetDateTime::now_utc()).unwrap();
        assert!(matches!(other.verify(&token), Err(ApiError::TokenInvalid)));
    }

    #[test]
    fn verify_rejects_issuer_and_audience_mismatch() {
        let keys = make_keys("same-secret", "good-iss", "good-aud");
        let wrong_iss = make_keys("same-secret", "bad-iss", "good-aud");
        let wrong_aud = make_keys("same-secret", "good-iss", "bad-aud");
        let token = keys.issue(1, "alice", OffsetDateTime::now_utc()).unwrap();
        assert!(matches!(
            wrong_iss.verify(&token),
            Err(ApiError::TokenInvalid)
        ));
        assert!(matches!(
            wrong_aud.verify(&token),
            Err(ApiError::TokenInvalid)
        ));
    }

    #[test]
    fn verify_rejects_elapsed_expiry() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let issued = OffsetDateTime::now_utc() - TOKEN_TTL - Duration::minutes(5);
        let token = keys.issue(1, "alice", issued).unwrap();
        assert!(matches!(keys.verify(&token), Err(ApiError::TokenExpired)));
    }

    #[test]
    fn verify_accepts_token_inside_window() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let issued = OffsetDateTime::now_utc() - TOKEN_TTL + Duration::minutes(5);
        let token = keys.issue(7, "bob", issued).unwrap();
        let claims = keys.verify(&token).expect("still inside the window");
        assert_eq!(claims.sub, 7);
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret", "iss", "aud");
        assert!(matches!(
            keys.verify("not.a.token"),
            Err(ApiError::TokenInvalid)
        ));
    }
}
