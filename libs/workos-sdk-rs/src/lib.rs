//! Rust SDK for the WorkOS API.
//!
//! # Features
//!
//! - **Typed errors** - Failed requests decode into [`HttpError`], or into one
//!   of the [`AuthenticationError`] variants when a login flow needs another
//!   step (MFA, organization selection, e-mail verification, SSO)
//! - **Resource APIs** - Organizations, Directory Sync, MFA, Passwordless,
//!   User Management, Audit Logs and Events
//! - **Webhooks** - Signature verification for incoming deliveries
//!
//! # Example
//!
//! ```rust,ignore
//! use workos_sdk::{AuthenticationError, ClientConfig, WorkosClient, WorkosError};
//! use workos_sdk::user_management::{AuthenticateContext, AuthenticateWithPasswordOpts};
//!
//! let client = WorkosClient::new(ClientConfig::new("sk_test_..."))?;
//!
//! let opts = AuthenticateWithPasswordOpts {
//!     context: AuthenticateContext {
//!         client_id: "client_...".to_string(),
//!         ..Default::default()
//!     },
//!     email: "marcelina@foo-corp.com".to_string(),
//!     password: "...".to_string(),
//! };
//!
//! match client.user_management().authenticate_with_password(&opts).await {
//!     Ok(session) => println!("Signed in {}", session.user.id),
//!     Err(WorkosError::Authentication(AuthenticationError::MfaChallenge(challenge))) => {
//!         // Ask for a TOTP code, then call authenticate_with_totp
//!         println!("Pending: {}", challenge.pending_authentication_token);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod audit_logs;
mod client;
mod config;
pub mod directory_sync;
mod error;
pub mod events;
pub mod http_error;
pub mod mfa;
pub mod organizations;
pub mod passwordless;
mod token;
pub mod user_management;
pub mod webhooks;

pub use client::WorkosClient;
pub use config::{ClientConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT};
pub use error::{WorkosError, is_authentication_error, is_bad_request};
pub use token::peek_access_token_claims;

// Re-export shared types for convenience
pub use workos_types::{
    AccessTokenClaims, AuthenticationError, EmailVerificationRequired, ErrorCode, FieldError,
    HttpError, InvalidCredentials, ListMetadata, ListResponse, MfaChallenge, MfaEnrollment,
    Order, OrganizationAuthenticationMethodsRequired, OrganizationSelectionRequired, SsoRequired,
};
