use serde::{Deserialize, Serialize};

/// JWT payload used for authentication.
///
/// A `Claims` value read back from a token reflects the user as they were at
/// issuance; a username change is invisible here until the next login. That
/// staleness is the price of validating without a store round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,            // user ID
    pub unique_name: String, // username at issuance
    pub iat: i64,            // issued at (unix timestamp)
    pub exp: i64,            // expires at (unix timestamp)
    pub iss: String,         // issuer
    pub aud: String,         // audience
}
