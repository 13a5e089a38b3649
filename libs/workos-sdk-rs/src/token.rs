use jsonwebtoken::{DecodingKey, Validation, decode};
use workos_types::AccessTokenClaims;

use crate::error::WorkosError;

/// Read the claims of a User Management access token.
///
/// The signature and expiry are NOT checked. Use this to inspect a token
/// that was already validated against the JWKS, e.g. to find its session id.
pub fn peek_access_token_claims(token: &str) -> Result<AccessTokenClaims, WorkosError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<AccessTokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| WorkosError::InvalidToken(e.to_string()))
}
