//! Passwordless (magic link) sessions.

use serde::Serialize;
use workos_types::passwordless::{PasswordlessSession, PasswordlessSessionType};

use crate::client::{ApiRequest, WorkosClient};
use crate::error::WorkosError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSessionOpts {
    /// E-mail of the user to authenticate
    pub email: String,

    #[serde(rename = "type")]
    pub kind: PasswordlessSessionType,

    /// Connection to authenticate through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,

    /// Where the user lands after authenticating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,

    /// Opaque value echoed back on the redirect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Session lifetime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u32>,
}

/// Passwordless endpoints, obtained from [`WorkosClient::passwordless`].
#[derive(Debug, Clone, Copy)]
pub struct Passwordless<'a> {
    client: &'a WorkosClient,
}

impl<'a> Passwordless<'a> {
    pub(crate) fn new(client: &'a WorkosClient) -> Self {
        Self { client }
    }

    pub async fn create_session(
        &self,
        opts: &CreateSessionOpts,
    ) -> Result<PasswordlessSession, WorkosError> {
        let request = ApiRequest::post(&["passwordless", "sessions"]).json(opts)?;
        self.client.send(request).await
    }

    /// E-mail the session's magic link to its user.
    pub async fn send_session(&self, session_id: &str) -> Result<(), WorkosError> {
        self.client
            .send_empty(ApiRequest::post(&[
                "passwordless",
                "sessions",
                session_id,
                "send",
            ]))
            .await
    }
}
