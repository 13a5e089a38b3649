//! Authentication-flow errors.
//!
//! These are returned by the authenticate endpoints when a login needs another
//! step (a second factor, an organization choice, email verification, ...)
//! rather than having failed outright. Most carry a pending authentication
//! token that resumes the flow on the next call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::null_as_default;
use crate::user_management::User;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Error)]
#[serde(default)]
#[error("{message}")]
pub struct EmailVerificationRequired {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_authentication_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_verification_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Error)]
#[serde(default)]
#[error("{message}")]
pub struct MfaEnrollment {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_authentication_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: User,
}

/// A factor the user may answer an MFA challenge with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticationFactorRef {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Error)]
#[serde(default)]
#[error("{message}")]
pub struct MfaChallenge {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_authentication_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub authentication_factors: Vec<AuthenticationFactorRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub user: User,
}

/// An organization the user may continue the login into.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationRef {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Error)]
#[serde(default)]
#[error("{message}")]
pub struct OrganizationSelectionRequired {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_authentication_token: String,
    #[serde(rename = "organization", alias = "organizations")]
    #[serde(deserialize_with = "null_as_default")]
    pub organizations: Vec<OrganizationRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Error)]
#[serde(default)]
#[error("{error}")]
pub struct SsoRequired {
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub connection_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_authentication_token: String,
}

/// Sign-in methods the organization accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationAuthMethods {
    #[serde(deserialize_with = "null_as_default")]
    pub apple_oauth: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub github_oauth: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub google_oauth: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub magic_auth: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub microsoft_oauth: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub password: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Error)]
#[serde(default)]
#[error("{error}")]
pub struct OrganizationAuthenticationMethodsRequired {
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sso_connection_ids: Vec<String>,
    pub auth_methods: OrganizationAuthMethods,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvalidCredentials {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
}

impl std::fmt::Display for InvalidCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.error)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl std::error::Error for InvalidCredentials {}

/// The closed set of authentication-flow errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticationError {
    #[error(transparent)]
    EmailVerificationRequired(EmailVerificationRequired),

    #[error(transparent)]
    MfaEnrollment(MfaEnrollment),

    #[error(transparent)]
    MfaChallenge(MfaChallenge),

    #[error(transparent)]
    OrganizationSelectionRequired(OrganizationSelectionRequired),

    #[error(transparent)]
    SsoRequired(SsoRequired),

    #[error(transparent)]
    OrganizationAuthenticationMethodsRequired(OrganizationAuthenticationMethodsRequired),

    #[error(transparent)]
    InvalidCredentials(InvalidCredentials),
}

impl AuthenticationError {
    /// Token to submit on the next call to resume the login, if the variant carries one.
    pub fn pending_authentication_token(&self) -> Option<&str> {
        let token = match self {
            Self::EmailVerificationRequired(e) => &e.pending_authentication_token,
            Self::MfaEnrollment(e) => &e.pending_authentication_token,
            Self::MfaChallenge(e) => &e.pending_authentication_token,
            Self::OrganizationSelectionRequired(e) => &e.pending_authentication_token,
            Self::SsoRequired(e) => &e.pending_authentication_token,
            Self::OrganizationAuthenticationMethodsRequired(_) | Self::InvalidCredentials(_) => {
                return None;
            }
        };
        (!token.is_empty()).then_some(token.as_str())
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for AuthenticationError {
                fn from(e: $variant) -> Self {
                    Self::$variant(e)
                }
            }
        )*
    };
}

impl_from_variant!(
    EmailVerificationRequired,
    MfaEnrollment,
    MfaChallenge,
    OrganizationSelectionRequired,
    SsoRequired,
    OrganizationAuthenticationMethodsRequired,
    InvalidCredentials,
);
