use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub recipe_id: i64,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct EditCommentRequest {
    pub comment: String,
}
