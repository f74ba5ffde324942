use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub recipe_id: i64,
    pub title: String,
    pub tag_line: Option<String>,
    pub difficulty: i16,       // 1-3
    pub time_to_prepare: i32,  // minutes
    pub method: String,
    pub recipe_img: Option<String>,
    pub cuisine: Option<String>,
    pub user_id: i64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub tag_line: Option<String>,
    pub difficulty: i16,
    pub time_to_prepare: i32,
    pub method: String,
    pub recipe_img: Option<String>,
    pub cuisine: Option<String>,
    pub user_id: i64,
}

const RECIPE_COLUMNS: &str = "recipe_id, title, tag_line, difficulty, time_to_prepare, method, \
                              recipe_img, cuisine, user_id, created_at";

pub async fn create(db: &PgPool, recipe: NewRecipe) -> Result<Recipe, sqlx::Error> {
    sqlx::query_as::<_, Recipe>(&format!(
        r#"
        INSERT INTO recipes (title, tag_line, difficulty, time_to_prepare, method,
                             recipe_img, cuisine, user_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {RECIPE_COLUMNS}
        "#
    ))
    .bind(&recipe.title)
    .bind(&recipe.tag_line)
    .bind(recipe.difficulty)
    .bind(recipe.time_to_prepare)
    .bind(&recipe.method)
    .bind(&recipe.recipe_img)
    .bind(&recipe.cuisine)
    .bind(recipe.user_id)
    .fetch_one(db)
    .await
}

pub async fn find_by_id(db: &PgPool, recipe_id: i64) -> Result<Option<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes WHERE recipe_id = $1"
    ))
    .bind(recipe_id)
    .fetch_optional(db)
    .await
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>(&format!(
        r#"
        SELECT {RECIPE_COLUMNS}
        FROM recipes
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn delete(db: &PgPool, recipe_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM recipes WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(db)
        .await?;
    Ok(())
}
