use serde::{Deserialize, Serialize};

use crate::auth::repo::User;

/// Public part of a user profile returned to clients. Never carries the
/// password hash.
#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub user_id: i64,
    pub username: String,
    pub name: String,
    pub profile_img: Option<String>,
    pub status: bool,
    pub bio: Option<String>,
}

impl From<User> for PublicProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            name: user.name,
            profile_img: user.profile_img,
            status: user.status,
            bio: user.bio,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBioRequest {
    pub bio: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileImgRequest {
    pub profile_img: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn public_profile_drops_the_password_hash() {
        let user = User {
            user_id: 1,
            username: "alice".into(),
            name: "Alice".into(),
            profile_img: None,
            password_hash: "$argon2id$secret".into(),
            status: false,
            bio: None,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&PublicProfile::from(user)).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("argon2"));
    }
}
