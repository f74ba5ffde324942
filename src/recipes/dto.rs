use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub tag_line: Option<String>,
    pub difficulty: i16,
    pub time_to_prepare: i32,
    pub method: String,
    pub recipe_img: Option<String>,
    pub cuisine: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}
