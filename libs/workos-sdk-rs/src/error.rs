use thiserror::Error;
use workos_types::{AuthenticationError, HttpError};

/// SDK errors.
#[derive(Debug, Error)]
pub enum WorkosError {
    /// API answered with a non-2xx status
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Login flow needs another step (MFA, organization selection, ...)
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// Connection, TLS or timeout failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Successful response whose body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Access token could not be decoded
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Webhook payload failed signature verification
    #[error("Webhook signature error: {0}")]
    WebhookSignature(String),
}

impl WorkosError {
    /// True for a generic HTTP error with status 400.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_bad_request())
    }

    /// True for any of the authentication-flow errors.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    pub fn as_http_error(&self) -> Option<&HttpError> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_authentication_error(&self) -> Option<&AuthenticationError> {
        match self {
            Self::Authentication(e) => Some(e),
            _ => None,
        }
    }
}

/// Reports whether `err` is a generic HTTP 400 error.
///
/// Accepts a `WorkosError`, a bare `HttpError`, or any error whose source
/// chain contains one of those.
pub fn is_bad_request(err: &(dyn std::error::Error + 'static)) -> bool {
    find_in_chain(err, |e| {
        if let Some(e) = e.downcast_ref::<WorkosError>() {
            return Some(e.is_bad_request());
        }
        e.downcast_ref::<HttpError>().map(HttpError::is_bad_request)
    })
}

/// Reports whether `err` is one of the authentication-flow errors.
///
/// Accepts a `WorkosError`, an `AuthenticationError`, one of the seven
/// variant structs, or any error whose source chain contains one of those.
pub fn is_authentication_error(err: &(dyn std::error::Error + 'static)) -> bool {
    use workos_types::{
        EmailVerificationRequired, InvalidCredentials, MfaChallenge, MfaEnrollment,
        OrganizationAuthenticationMethodsRequired, OrganizationSelectionRequired, SsoRequired,
    };

    find_in_chain(err, |e| {
        if let Some(e) = e.downcast_ref::<WorkosError>() {
            return Some(e.is_authentication_error());
        }
        let typed = e.is::<AuthenticationError>()
            || e.is::<EmailVerificationRequired>()
            || e.is::<MfaEnrollment>()
            || e.is::<MfaChallenge>()
            || e.is::<OrganizationSelectionRequired>()
            || e.is::<SsoRequired>()
            || e.is::<OrganizationAuthenticationMethodsRequired>()
            || e.is::<InvalidCredentials>();
        typed.then_some(true)
    })
}

// Walks the source chain until `check` recognises an error, like errors.As.
fn find_in_chain(
    err: &(dyn std::error::Error + 'static),
    check: impl Fn(&(dyn std::error::Error + 'static)) -> Option<bool>,
) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(answer) = check(e) {
            return answer;
        }
        current = e.source();
    }
    false
}
