//! User Management API.
//!
//! Covers users, e-mail verification, password resets, the hosted
//! authorization flow, organization memberships and invitations.
//!
//! The `authenticate_with_*` methods are where multi-step logins surface: a
//! login that needs a second factor, an organization choice or a verified
//! e-mail fails with [`WorkosError::Authentication`], and the carried pending
//! authentication token is passed to the matching `authenticate_with_*` call
//! to continue.

use serde::{Deserialize, Serialize};
use url::Url;
use workos_types::mfa::{Challenge, Factor, FactorType};
use workos_types::user_management::{
    EmailVerification, Invitation, MagicAuth, OrganizationMembership,
    OrganizationMembershipStatus, PasswordReset, User, UserResponse,
};
use workos_types::{ListResponse, Order};

use crate::client::{ApiRequest, Query, WorkosClient};
use crate::error::WorkosError;

const USER_MANAGEMENT: &str = "user_management";

/// Filters for [`UserManagement::list_users`].
#[derive(Debug, Clone, Default)]
pub struct ListUsersOpts {
    pub email: Option<String>,

    pub organization_id: Option<String>,

    /// Defaults to 10
    pub limit: Option<u32>,

    pub order: Order,

    pub before: Option<String>,

    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateUserOpts {
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Pre-hashed password, used when migrating users
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// e.g. "bcrypt"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
}

/// Fields left as `None` are not changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserOpts {
    #[serde(skip)]
    pub user: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResetPasswordOpts {
    /// Token from the password reset e-mail
    pub token: String,

    pub new_password: String,
}

/// Parameters of the hosted sign-in URL.
///
/// One of `provider`, `connection_id` or `organization_id` is required.
#[derive(Debug, Clone, Default)]
pub struct GetAuthorizationUrlOpts {
    pub client_id: String,

    pub redirect_uri: String,

    /// e.g. "authkit" or "GoogleOAuth"
    pub provider: Option<String>,

    pub connection_id: Option<String>,

    pub organization_id: Option<String>,

    /// Opaque value echoed back on the redirect
    pub state: Option<String>,

    pub code_challenge: Option<String>,

    /// Only "S256" is supported upstream
    pub code_challenge_method: Option<String>,

    pub domain_hint: Option<String>,

    pub login_hint: Option<String>,

    /// "sign-in" or "sign-up"
    pub screen_hint: Option<String>,
}

/// Fields shared by every authenticate request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticateContext {
    pub client_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticateWithPasswordOpts {
    #[serde(flatten)]
    pub context: AuthenticateContext,

    pub email: String,

    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticateWithCodeOpts {
    #[serde(flatten)]
    pub context: AuthenticateContext,

    /// Code from the authorization redirect
    pub code: String,

    /// PKCE verifier matching the `code_challenge` of the authorization URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticateWithMagicAuthOpts {
    #[serde(flatten)]
    pub context: AuthenticateContext,

    pub code: String,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_authorization_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticateWithTotpOpts {
    #[serde(flatten)]
    pub context: AuthenticateContext,

    pub code: String,

    pub authentication_challenge_id: String,

    pub pending_authentication_token: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticateWithEmailVerificationCodeOpts {
    #[serde(flatten)]
    pub context: AuthenticateContext,

    pub code: String,

    pub pending_authentication_token: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticateWithOrganizationSelectionOpts {
    #[serde(flatten)]
    pub context: AuthenticateContext,

    pub organization_id: String,

    pub pending_authentication_token: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticateWithRefreshTokenOpts {
    #[serde(flatten)]
    pub context: AuthenticateContext,

    pub refresh_token: String,

    /// Switch the session to another organization the user belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

/// Someone signed in as another user from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Impersonator {
    pub email: String,
    pub reason: Option<String>,
}

/// Successful result of an `authenticate_with_*` call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticateResponse {
    pub user: User,

    /// Organization the session is scoped to, if any
    pub organization_id: Option<String>,

    pub access_token: String,

    pub refresh_token: String,

    /// e.g. "Password", "GoogleOAuth"
    pub authentication_method: Option<String>,

    pub impersonator: Option<Impersonator>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMagicAuthOpts {
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EnrollAuthFactorOpts {
    #[serde(skip)]
    pub user: String,

    #[serde(rename = "type")]
    pub kind: FactorType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub totp_issuer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub totp_user: Option<String>,

    /// Existing TOTP secret to import
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totp_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollAuthFactorResponse {
    #[serde(rename = "authentication_factor")]
    pub factor: Factor,

    #[serde(rename = "authentication_challenge")]
    pub challenge: Challenge,
}

/// Filters for [`UserManagement::list_organization_memberships`].
#[derive(Debug, Clone, Default)]
pub struct ListOrganizationMembershipsOpts {
    pub user_id: Option<String>,

    pub organization_id: Option<String>,

    /// Only memberships in one of these states
    pub statuses: Vec<OrganizationMembershipStatus>,

    pub limit: Option<u32>,

    pub order: Order,

    pub before: Option<String>,

    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOrganizationMembershipOpts {
    pub user_id: String,

    pub organization_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOrganizationMembershipOpts {
    #[serde(skip)]
    pub organization_membership: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_slug: Option<String>,
}

/// Filters for [`UserManagement::list_invitations`].
#[derive(Debug, Clone, Default)]
pub struct ListInvitationsOpts {
    pub email: Option<String>,

    pub organization_id: Option<String>,

    pub limit: Option<u32>,

    pub order: Order,

    pub before: Option<String>,

    pub after: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SendInvitationOpts {
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inviter_user_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_slug: Option<String>,
}

#[derive(Serialize)]
struct AuthenticateBody<'a, T> {
    client_secret: &'a str,
    grant_type: &'static str,
    #[serde(flatten)]
    params: &'a T,
}

/// User Management endpoints, obtained from [`WorkosClient::user_management`].
#[derive(Debug, Clone, Copy)]
pub struct UserManagement<'a> {
    client: &'a WorkosClient,
}

impl<'a> UserManagement<'a> {
    pub(crate) fn new(client: &'a WorkosClient) -> Self {
        Self { client }
    }

    pub async fn get_user(&self, user: &str) -> Result<User, WorkosError> {
        self.client
            .send(ApiRequest::get(&[USER_MANAGEMENT, "users", user]))
            .await
    }

    pub async fn list_users(&self, opts: &ListUsersOpts) -> Result<ListResponse<User>, WorkosError> {
        let query = Query::new()
            .push_opt("email", opts.email.as_deref())
            .push_opt("organization_id", opts.organization_id.as_deref())
            .page(
                opts.limit,
                opts.order,
                opts.before.as_deref(),
                opts.after.as_deref(),
            );

        self.client
            .send(ApiRequest::get(&[USER_MANAGEMENT, "users"]).query(query))
            .await
    }

    pub async fn create_user(&self, opts: &CreateUserOpts) -> Result<User, WorkosError> {
        let request = ApiRequest::post(&[USER_MANAGEMENT, "users"]).json(opts)?;
        self.client.send(request).await
    }

    pub async fn update_user(&self, opts: &UpdateUserOpts) -> Result<User, WorkosError> {
        let request =
            ApiRequest::put(&[USER_MANAGEMENT, "users", opts.user.as_str()]).json(opts)?;
        self.client.send(request).await
    }

    pub async fn delete_user(&self, user: &str) -> Result<(), WorkosError> {
        self.client
            .send_empty(ApiRequest::delete(&[USER_MANAGEMENT, "users", user]))
            .await
    }

    pub async fn get_email_verification(
        &self,
        email_verification_id: &str,
    ) -> Result<EmailVerification, WorkosError> {
        self.client
            .send(ApiRequest::get(&[
                USER_MANAGEMENT,
                "email_verification",
                email_verification_id,
            ]))
            .await
    }

    /// Send the user a fresh e-mail verification code.
    pub async fn send_verification_email(&self, user: &str) -> Result<UserResponse, WorkosError> {
        self.client
            .send(ApiRequest::post(&[
                USER_MANAGEMENT,
                "users",
                user,
                "email_verification",
                "send",
            ]))
            .await
    }

    pub async fn verify_email(&self, user: &str, code: &str) -> Result<UserResponse, WorkosError> {
        #[derive(Serialize)]
        struct Body<'a> {
            code: &'a str,
        }

        let request = ApiRequest::post(&[
            USER_MANAGEMENT,
            "users",
            user,
            "email_verification",
            "confirm",
        ])
        .json(&Body { code })?;
        self.client.send(request).await
    }

    pub async fn get_password_reset(
        &self,
        password_reset_id: &str,
    ) -> Result<PasswordReset, WorkosError> {
        self.client
            .send(ApiRequest::get(&[
                USER_MANAGEMENT,
                "password_reset",
                password_reset_id,
            ]))
            .await
    }

    pub async fn create_password_reset(&self, email: &str) -> Result<PasswordReset, WorkosError> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
        }

        let request =
            ApiRequest::post(&[USER_MANAGEMENT, "password_reset"]).json(&Body { email })?;
        self.client.send(request).await
    }

    pub async fn reset_password(&self, opts: &ResetPasswordOpts) -> Result<UserResponse, WorkosError> {
        let request =
            ApiRequest::post(&[USER_MANAGEMENT, "password_reset", "confirm"]).json(opts)?;
        self.client.send(request).await
    }

    /// URL of the hosted sign-in page. Makes no request.
    pub fn get_authorization_url(&self, opts: &GetAuthorizationUrlOpts) -> Result<Url, WorkosError> {
        if opts.client_id.is_empty() {
            return Err(WorkosError::InvalidRequest("client id is required".into()));
        }
        if opts.redirect_uri.is_empty() {
            return Err(WorkosError::InvalidRequest("redirect uri is required".into()));
        }
        let has_target = [&opts.provider, &opts.connection_id, &opts.organization_id]
            .iter()
            .any(|v| v.as_deref().is_some_and(|v| !v.is_empty()));
        if !has_target {
            return Err(WorkosError::InvalidRequest(
                "incomplete arguments: need provider, connection id or organization id".into(),
            ));
        }

        // Sorted by key.
        let query = Query::new()
            .push("client_id", &opts.client_id)
            .push_opt("code_challenge", opts.code_challenge.as_deref())
            .push_opt("code_challenge_method", opts.code_challenge_method.as_deref())
            .push_opt("connection_id", opts.connection_id.as_deref())
            .push_opt("domain_hint", opts.domain_hint.as_deref())
            .push_opt("login_hint", opts.login_hint.as_deref())
            .push_opt("organization_id", opts.organization_id.as_deref())
            .push_opt("provider", opts.provider.as_deref())
            .push("redirect_uri", &opts.redirect_uri)
            .push("response_type", "code")
            .push_opt("screen_hint", opts.screen_hint.as_deref())
            .push_opt("state", opts.state.as_deref());

        self.url_with_query(&[USER_MANAGEMENT, "authorize"], &query)
    }

    pub async fn authenticate_with_password(
        &self,
        opts: &AuthenticateWithPasswordOpts,
    ) -> Result<AuthenticateResponse, WorkosError> {
        self.authenticate("password", opts).await
    }

    pub async fn authenticate_with_code(
        &self,
        opts: &AuthenticateWithCodeOpts,
    ) -> Result<AuthenticateResponse, WorkosError> {
        self.authenticate("authorization_code", opts).await
    }

    pub async fn authenticate_with_magic_auth(
        &self,
        opts: &AuthenticateWithMagicAuthOpts,
    ) -> Result<AuthenticateResponse, WorkosError> {
        self.authenticate("urn:workos:oauth:grant-type:magic-auth:code", opts)
            .await
    }

    /// Answer an MFA challenge raised by an earlier authenticate call.
    pub async fn authenticate_with_totp(
        &self,
        opts: &AuthenticateWithTotpOpts,
    ) -> Result<AuthenticateResponse, WorkosError> {
        self.authenticate("urn:workos:oauth:grant-type:mfa-totp", opts)
            .await
    }

    pub async fn authenticate_with_email_verification_code(
        &self,
        opts: &AuthenticateWithEmailVerificationCodeOpts,
    ) -> Result<AuthenticateResponse, WorkosError> {
        self.authenticate("urn:workos:oauth:grant-type:email-verification:code", opts)
            .await
    }

    pub async fn authenticate_with_organization_selection(
        &self,
        opts: &AuthenticateWithOrganizationSelectionOpts,
    ) -> Result<AuthenticateResponse, WorkosError> {
        self.authenticate("urn:workos:oauth:grant-type:organization-selection", opts)
            .await
    }

    pub async fn authenticate_with_refresh_token(
        &self,
        opts: &AuthenticateWithRefreshTokenOpts,
    ) -> Result<AuthenticateResponse, WorkosError> {
        self.authenticate("refresh_token", opts).await
    }

    async fn authenticate<T: Serialize>(
        &self,
        grant_type: &'static str,
        params: &T,
    ) -> Result<AuthenticateResponse, WorkosError> {
        let body = AuthenticateBody {
            client_secret: self.client.api_key(),
            grant_type,
            params,
        };
        let request = ApiRequest::post(&[USER_MANAGEMENT, "authenticate"]).json(&body)?;
        self.client.send(request).await
    }

    pub async fn get_magic_auth(&self, magic_auth_id: &str) -> Result<MagicAuth, WorkosError> {
        self.client
            .send(ApiRequest::get(&[USER_MANAGEMENT, "magic_auth", magic_auth_id]))
            .await
    }

    /// Create a one-time code and e-mail it to the user.
    pub async fn create_magic_auth(&self, opts: &CreateMagicAuthOpts) -> Result<MagicAuth, WorkosError> {
        let request = ApiRequest::post(&[USER_MANAGEMENT, "magic_auth"]).json(opts)?;
        self.client.send(request).await
    }

    pub async fn enroll_auth_factor(
        &self,
        opts: &EnrollAuthFactorOpts,
    ) -> Result<EnrollAuthFactorResponse, WorkosError> {
        let request =
            ApiRequest::post(&[USER_MANAGEMENT, "users", opts.user.as_str(), "auth_factors"])
                .json(opts)?;
        self.client.send(request).await
    }

    pub async fn list_auth_factors(&self, user: &str) -> Result<ListResponse<Factor>, WorkosError> {
        self.client
            .send(ApiRequest::get(&[USER_MANAGEMENT, "users", user, "auth_factors"]))
            .await
    }

    pub async fn get_organization_membership(
        &self,
        organization_membership: &str,
    ) -> Result<OrganizationMembership, WorkosError> {
        self.client
            .send(ApiRequest::get(&[
                USER_MANAGEMENT,
                "organization_memberships",
                organization_membership,
            ]))
            .await
    }

    pub async fn list_organization_memberships(
        &self,
        opts: &ListOrganizationMembershipsOpts,
    ) -> Result<ListResponse<OrganizationMembership>, WorkosError> {
        let query = Query::new()
            .push_opt("user_id", opts.user_id.as_deref())
            .push_opt("organization_id", opts.organization_id.as_deref())
            .push_all("statuses", &opts.statuses)
            .page(
                opts.limit,
                opts.order,
                opts.before.as_deref(),
                opts.after.as_deref(),
            );

        self.client
            .send(ApiRequest::get(&[USER_MANAGEMENT, "organization_memberships"]).query(query))
            .await
    }

    pub async fn create_organization_membership(
        &self,
        opts: &CreateOrganizationMembershipOpts,
    ) -> Result<OrganizationMembership, WorkosError> {
        let request =
            ApiRequest::post(&[USER_MANAGEMENT, "organization_memberships"]).json(opts)?;
        self.client.send(request).await
    }

    pub async fn update_organization_membership(
        &self,
        opts: &UpdateOrganizationMembershipOpts,
    ) -> Result<OrganizationMembership, WorkosError> {
        let request = ApiRequest::put(&[
            USER_MANAGEMENT,
            "organization_memberships",
            opts.organization_membership.as_str(),
        ])
        .json(opts)?;
        self.client.send(request).await
    }

    pub async fn delete_organization_membership(
        &self,
        organization_membership: &str,
    ) -> Result<(), WorkosError> {
        self.client
            .send_empty(ApiRequest::delete(&[
                USER_MANAGEMENT,
                "organization_memberships",
                organization_membership,
            ]))
            .await
    }

    pub async fn deactivate_organization_membership(
        &self,
        organization_membership: &str,
    ) -> Result<OrganizationMembership, WorkosError> {
        self.client
            .send(ApiRequest::put(&[
                USER_MANAGEMENT,
                "organization_memberships",
                organization_membership,
                "deactivate",
            ]))
            .await
    }

    pub async fn reactivate_organization_membership(
        &self,
        organization_membership: &str,
    ) -> Result<OrganizationMembership, WorkosError> {
        self.client
            .send(ApiRequest::put(&[
                USER_MANAGEMENT,
                "organization_memberships",
                organization_membership,
                "reactivate",
            ]))
            .await
    }

    pub async fn get_invitation(&self, invitation: &str) -> Result<Invitation, WorkosError> {
        self.client
            .send(ApiRequest::get(&[USER_MANAGEMENT, "invitations", invitation]))
            .await
    }

    pub async fn find_invitation_by_token(
        &self,
        invitation_token: &str,
    ) -> Result<Invitation, WorkosError> {
        self.client
            .send(ApiRequest::get(&[
                USER_MANAGEMENT,
                "invitations",
                "by_token",
                invitation_token,
            ]))
            .await
    }

    pub async fn list_invitations(
        &self,
        opts: &ListInvitationsOpts,
    ) -> Result<ListResponse<Invitation>, WorkosError> {
        let query = Query::new()
            .push_opt("email", opts.email.as_deref())
            .push_opt("organization_id", opts.organization_id.as_deref())
            .page(
                opts.limit,
                opts.order,
                opts.before.as_deref(),
                opts.after.as_deref(),
            );

        self.client
            .send(ApiRequest::get(&[USER_MANAGEMENT, "invitations"]).query(query))
            .await
    }

    pub async fn send_invitation(&self, opts: &SendInvitationOpts) -> Result<Invitation, WorkosError> {
        let request = ApiRequest::post(&[USER_MANAGEMENT, "invitations"]).json(opts)?;
        self.client.send(request).await
    }

    pub async fn revoke_invitation(&self, invitation: &str) -> Result<Invitation, WorkosError> {
        self.client
            .send(ApiRequest::post(&[
                USER_MANAGEMENT,
                "invitations",
                invitation,
                "revoke",
            ]))
            .await
    }

    /// URL of the JSON Web Key Set that signs this client's access tokens.
    pub fn get_jwks_url(&self, client_id: &str) -> Result<Url, WorkosError> {
        self.client.url(&["sso", "jwks", client_id])
    }

    /// URL that ends the session and redirects the browser.
    pub fn get_logout_url(
        &self,
        session_id: &str,
        return_to: Option<&str>,
    ) -> Result<Url, WorkosError> {
        if session_id.is_empty() {
            return Err(WorkosError::InvalidRequest("session id is required".into()));
        }

        let query = Query::new()
            .push("session_id", session_id)
            .push_opt("return_to", return_to);
        self.url_with_query(&[USER_MANAGEMENT, "sessions", "logout"], &query)
    }

    pub async fn revoke_session(&self, session_id: &str) -> Result<(), WorkosError> {
        #[derive(Serialize)]
        struct Body<'a> {
            session_id: &'a str,
        }

        let request = ApiRequest::post(&[USER_MANAGEMENT, "sessions", "revoke"])
            .json(&Body { session_id })?;
        self.client.send_empty(request).await
    }

    fn url_with_query(&self, segments: &[&str], query: &Query) -> Result<Url, WorkosError> {
        let mut url = self.client.url(segments)?;
        url.query_pairs_mut().extend_pairs(query.pairs());
        Ok(url)
    }
}
