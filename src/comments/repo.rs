use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// A comment on a recipe. `author` is the commenting user's username at the
/// time of writing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub comment_id: i64,
    pub recipe_id: i64,
    pub user_id: i64,
    pub author: String,
    pub comment: String,
    pub created_at: OffsetDateTime,
}

const COMMENT_COLUMNS: &str = "comment_id, recipe_id, user_id, author, comment, created_at";

pub async fn create(
    db: &PgPool,
    recipe_id: i64,
    user_id: i64,
    author: &str,
    comment: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        r#"
        INSERT INTO recipe_comments (recipe_id, user_id, author, comment)
        VALUES ($1, $2, $3, $4)
        RETURNING {COMMENT_COLUMNS}
        "#
    ))
    .bind(recipe_id)
    .bind(user_id)
    .bind(author)
    .bind(comment)
    .fetch_one(db)
    .await
}

pub async fn find_by_id(db: &PgPool, comment_id: i64) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM recipe_comments WHERE comment_id = $1"
    ))
    .bind(comment_id)
    .fetch_optional(db)
    .await
}

pub async fn list_by_recipe(db: &PgPool, recipe_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM recipe_comments
        WHERE recipe_id = $1
        ORDER BY created_at ASC
        "#
    ))
    .bind(recipe_id)
    .fetch_all(db)
    .await
}

pub async fn update_text(
    db: &PgPool,
    comment_id: i64,
    comment: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        "UPDATE recipe_comments SET comment = $2 WHERE comment_id = $1 RETURNING {COMMENT_COLUMNS}"
    ))
    .bind(comment_id)
    .bind(comment)
    .fetch_optional(db)
    .await
}

pub async fn delete(db: &PgPool, comment_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM recipe_comments WHERE comment_id = $1")
        .bind(comment_id)
        .execute(db)
        .await?;
    Ok(())
}
