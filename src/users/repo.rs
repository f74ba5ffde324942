use sqlx::PgPool;

use crate::auth::repo::User;

const USER_COLUMNS: &str =
    "user_id, username, name, profile_img, password_hash, status, bio, created_at";

pub async fn find_by_id(db: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn update_bio(db: &PgPool, user_id: i64, bio: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET bio = $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(bio)
    .fetch_optional(db)
    .await
}

pub async fn update_name(
    db: &PgPool,
    user_id: i64,
    name: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET name = $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(name)
    .fetch_optional(db)
    .await
}

pub async fn update_profile_img(
    db: &PgPool,
    user_id: i64,
    profile_img: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET profile_img = $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(profile_img)
    .fetch_optional(db)
    .await
}
