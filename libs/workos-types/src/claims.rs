use serde::{Deserialize, Serialize};

/// Claims carried by a User Management access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User ID (subject)
    pub sub: String,

    /// Session ID, used for logout URLs and session revocation
    #[serde(default)]
    pub sid: String,

    /// Organization the session is scoped to, if any
    #[serde(default)]
    pub org_id: Option<String>,

    /// Role slug within that organization
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub permissions: Vec<String>,

    #[serde(default)]
    pub iss: Option<String>,

    #[serde(default)]
    pub jti: Option<String>,

    /// Token expiration (Unix timestamp)
    pub exp: i64,

    /// Token issued at (Unix timestamp)
    pub iat: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims_optional_fields() {
        let claims: AccessTokenClaims = serde_json::from_str(
            r#"{"sub":"user_123","sid":"session_abc","exp":1735689600,"iat":1735603200}"#,
        )
        .unwrap();

        assert_eq!(claims.sub, "user_123");
        assert_eq!(claims.sid, "session_abc");
        assert!(claims.org_id.is_none());
        assert!(claims.permissions.is_empty());
    }
}
