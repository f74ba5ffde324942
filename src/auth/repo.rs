use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,                // assigned by the store on insert
    pub username: String,            // unique
    pub name: String,
    pub profile_img: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,       // argon2 PHC string, not exposed in JSON
    pub status: bool,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Fields for a new user row. Carries the hash, never the plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub profile_img: Option<String>,
    pub password_hash: String,
    pub status: bool,
    pub bio: Option<String>,
}

/// Persistence boundary for user records. The auth service only talks to this
/// trait; store errors surface unchanged.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error>;
    async fn create(&self, user: NewUser) -> Result<User, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, name, profile_img, password_hash, status, bio, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, name, profile_img, password_hash, status, bio, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
    }

    async fn create(&self, user: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, name, profile_img, password_hash, status, bio)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id, username, name, profile_img, password_hash, status, bio, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.profile_img)
        .bind(&user.password_hash)
        .bind(user.status)
        .bind(&user.bio)
        .fetch_one(&self.db)
        .await
    }
}

/// Postgres unique_violation, raised when two registrations race past the
/// username pre-check.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
