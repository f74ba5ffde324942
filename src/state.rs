use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::auth::jwt::JwtKeys;
use crate::auth::repo::PgUserStore;
use crate::auth::service::AuthService;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self::from_parts(db, config))
    }

    /// Wire the auth service with its store and signing keys injected
    /// explicitly; nothing reads the secret from ambient globals.
    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        let auth = AuthService::new(
            Arc::new(PgUserStore::new(db.clone())),
            JwtKeys::new(&config.jwt),
        );
        Self { db, config, auth }
    }
}
