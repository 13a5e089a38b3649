use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Error codes returned by WorkOS endpoints in the `code` or `error` field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    EmailVerificationRequired,
    MfaEnrollment,
    MfaChallenge,
    OrganizationSelectionRequired,
    SsoRequired,
    OrganizationAuthenticationMethodsRequired,
    InvalidCredentials,
    UserCreationError,
}

/// One rejected request field from a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub code: String,
}

/// Generic failure for a non-2xx response that is not an authentication-flow error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{status}: request id {request_id:?}: {message}")]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub code: u16,

    /// Status line, e.g. "400 Bad Request".
    pub status: String,

    /// Value of the `X-Request-ID` response header, empty when absent.
    pub request_id: String,

    /// Human-readable message. When the body carried none, this is the raw
    /// body text; bytes that are not valid UTF-8 become U+FFFD.
    pub message: String,

    /// Vendor error code, when the body carried one.
    pub error_code: Option<String>,

    pub errors: Vec<String>,

    pub field_errors: Vec<FieldError>,
}

impl HttpError {
    pub fn is_bad_request(&self) -> bool {
        self.code == 400
    }
}
