//! Shared types for the WorkOS API.
//!
//! This crate provides:
//! - Resource models for organizations, directory sync, MFA, passwordless,
//!   user management, audit logs, events and webhooks
//! - The error values produced when a request fails (`HttpError` and the
//!   authentication-flow errors in `AuthenticationError`)
//! - Access token claims

pub mod audit_logs;
mod authentication_errors;
mod claims;
pub mod common;
pub mod directory_sync;
mod errors;
pub mod events;
pub mod mfa;
pub mod organizations;
pub mod passwordless;
pub mod sso;
pub mod user_management;
pub mod webhooks;

pub use authentication_errors::{
    AuthenticationError, AuthenticationFactorRef, EmailVerificationRequired, InvalidCredentials,
    MfaChallenge, MfaEnrollment, OrganizationAuthMethods,
    OrganizationAuthenticationMethodsRequired, OrganizationRef, OrganizationSelectionRequired,
    SsoRequired,
};
pub use claims::AccessTokenClaims;
pub use common::{ListMetadata, ListResponse, Order, RESPONSE_LIMIT, RoleResponse};
pub use errors::{ErrorCode, FieldError, HttpError};
