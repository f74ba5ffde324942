use crate::auth::extractors::AuthUser;
use crate::error::ApiError;

/// Compare the request's claim set against a resource's owning user id. Pure
/// comparison, no store access. Callers check resource existence first, then
/// credential presence, then this.
pub fn ensure_owner(claims: &AuthUser, owner_id: i64) -> Result<(), ApiError> {
    if claims.user_id == owner_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(user_id: i64) -> AuthUser {
        AuthUser {
            user_id,
            username: "alice".into(),
        }
    }

    #[test]
    fn owner_is_allowed() {
        assert!(ensure_owner(&claims(5), 5).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        assert!(matches!(
            ensure_owner(&claims(5), 6),
            Err(ApiError::Forbidden)
        ));
    }
}
