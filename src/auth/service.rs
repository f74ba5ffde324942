use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::{is_unique_violation, NewUser, UserStore};
use crate::error::ApiError;

/// Identity handed back to a client after register or login.
#[derive(Debug, Clone)]
pub struct LoggedInUser {
    pub user_id: i64,
    pub username: String,
    pub token: String,
}

/// Profile data accepted at registration. The password stays plaintext only
/// until `register` hashes it; it is never logged or persisted as-is.
#[derive(Debug)]
pub struct NewProfile {
    pub username: String,
    pub name: String,
    pub profile_img: Option<String>,
    pub password: String,
    pub bio: Option<String>,
}

/// Registration and login orchestration over an injected user store and
/// signing keys. Stateless between calls; safe to clone per request.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { store, keys }
    }

    /// Register a new user: uniqueness check, hash, persist, re-fetch for the
    /// store-assigned id, issue a token. Not idempotent; a second call with
    /// the same username fails with `DuplicateUsername`.
    pub async fn register(&self, profile: NewProfile) -> Result<LoggedInUser, ApiError> {
        if self
            .store
            .find_by_username(&profile.username)
            .await?
            .is_some()
        {
            warn!(username = %profile.username, "registration with taken username");
            return Err(ApiError::DuplicateUsername(profile.username));
        }

        let password_hash = hash_password(&profile.password)?;
        let row = NewUser {
            username: profile.username.clone(),
            name: profile.name,
            profile_img: profile.profile_img,
            password_hash,
            status: false,
            bio: profile.bio,
        };
        if let Err(e) = self.store.create(row).await {
            // Two registrations can race past the pre-check; the unique index
            // turns the loser into the same recoverable outcome.
            if is_unique_violation(&e) {
                warn!(username = %profile.username, "registration lost uniqueness race");
                return Err(ApiError::DuplicateUsername(profile.username));
            }
            return Err(e.into());
        }

        let user = self
            .store
            .find_by_username(&profile.username)
            .await?
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("created user not found")))?;

        let token = self
            .keys
            .issue(user.user_id, &user.username, OffsetDateTime::now_utc())?;
        info!(user_id = user.user_id, username = %user.username, "user registered");
        Ok(LoggedInUser {
            user_id: user.user_id,
            username: user.username,
            token,
        })
    }

    /// Verify credentials and issue a fresh token. Idempotent and side-effect
    /// free. Unknown username and wrong password are distinct outcomes here;
    /// the HTTP boundary renders them identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoggedInUser, ApiError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            warn!(username, "login for unknown username");
            return Err(ApiError::UserNotFound);
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = user.user_id, "login with wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        let token = self
            .keys
            .issue(user.user_id, &user.username, OffsetDateTime::now_utc())?;
        info!(user_id = user.user_id, username = %user.username, "user logged in");
        Ok(LoggedInUser {
            user_id: user.user_id,
            username: user.username,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::auth::repo::User;
    use crate::config::JwtConfig;

    #[derive(Default)]
    struct MemStore {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserStore for MemStore {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.user_id == user_id)
                .cloned())
        }

        async fn create(&self, user: NewUser) -> Result<User, sqlx::Error> {
            let mut users = self.users.lock().unwrap();
            let created = User {
                user_id: users.len() as i64 + 1,
                username: user.username,
                name: user.name,
                profile_img: user.profile_img,
                password_hash: user.password_hash,
                status: user.status,
                bio: user.bio,
                created_at: OffsetDateTime::now_utc(),
            };
            users.push(created.clone());
            Ok(created)
        }
    }

    fn make_service() -> (AuthService, JwtKeys) {
        let keys = JwtKeys::new(&JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
        });
        (
            AuthService::new(Arc::new(MemStore::default()), keys.clone()),
            keys,
        )
    }

    fn alice() -> NewProfile {
        NewProfile {
            username: "alice".into(),
            name: "Alice".into(),
            profile_img: None,
            password: "hunter2hunter2".into(),
            bio: Some("home cook".into()),
        }
    }

    #[tokio::test]
    async fn register_issues_a_validating_token() {
        let (service, keys) = make_service();
        let logged_in = service.register(alice()).await.expect("register");
        assert_eq!(logged_in.username, "alice");

        let claims = keys.verify(&logged_in.token).expect("token validates");
        assert_eq!(claims.sub, logged_in.user_id);
        assert_eq!(claims.unique_name, "alice");
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let (service, _) = make_service();
        service.register(alice()).await.expect("first register");
        let err = service.register(alice()).await.unwrap_err();
        assert!(matches!(err, ApiError::DuplicateUsername(u) if u == "alice"));
    }

    #[tokio::test]
    async fn register_stores_a_hash_not_the_password() {
        let (service, _) = make_service();
        let logged_in = service.register(alice()).await.expect("register");

        let service_store = service.store.find_by_id(logged_in.user_id).await.unwrap();
        let stored = service_store.expect("user persisted");
        assert_ne!(stored.password_hash, "hunter2hunter2");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn login_returns_token_for_the_stored_user() {
        let (service, keys) = make_service();
        let registered = service.register(alice()).await.expect("register");

        let logged_in = service
            .login("alice", "hunter2hunter2")
            .await
            .expect("login");
        assert_eq!(logged_in.user_id, registered.user_id);

        let claims = keys.verify(&logged_in.token).expect("token validates");
        assert_eq!(claims.sub, registered.user_id);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let (service, _) = make_service();
        service.register(alice()).await.expect("register");
        let err = service.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_unknown_username() {
        let (service, _) = make_service();
        let err = service.login("nobody", "x").await.unwrap_err();
        assert!(matches!(err, ApiError::UserNotFound));
    }
}
