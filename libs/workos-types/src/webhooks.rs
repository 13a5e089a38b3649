use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::events;
use crate::sso::{ConnectionDomain, ConnectionState, ConnectionStatus};
use crate::user_management::InvitationState;

/// A webhook delivery, as posted to the receiving endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: String,

    /// Event name, e.g. "connection.activated"
    pub event: String,

    #[serde(default)]
    pub data: Value,

    #[serde(
        default,
        rename = "created_at",
        alias = "createdAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl WebhookEvent {
    /// Decode `data` according to the event name.
    ///
    /// Events without a dedicated payload type come back as [`WebhookPayload::Other`].
    pub fn payload(&self) -> Result<WebhookPayload, serde_json::Error> {
        let data = self.data.clone();
        Ok(match self.event.as_str() {
            events::EMAIL_VERIFICATION_CREATED => {
                WebhookPayload::EmailVerificationCreated(serde_json::from_value(data)?)
            }
            events::PASSWORD_RESET_CREATED => {
                WebhookPayload::PasswordResetCreated(serde_json::from_value(data)?)
            }
            events::CONNECTION_ACTIVATED => {
                WebhookPayload::ConnectionActivated(serde_json::from_value(data)?)
            }
            events::CONNECTION_DEACTIVATED => {
                WebhookPayload::ConnectionDeactivated(serde_json::from_value(data)?)
            }
            events::CONNECTION_DELETED => {
                WebhookPayload::ConnectionDeleted(serde_json::from_value(data)?)
            }
            events::INVITATION_CREATED => {
                WebhookPayload::InvitationCreated(serde_json::from_value(data)?)
            }
            _ => WebhookPayload::Other(data),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    EmailVerificationCreated(EmailVerificationCreated),
    PasswordResetCreated(PasswordResetCreated),
    ConnectionActivated(ConnectionEventData),
    ConnectionDeactivated(ConnectionEventData),
    ConnectionDeleted(ConnectionEventData),
    InvitationCreated(InvitationCreated),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailVerificationCreated {
    #[serde(default)]
    pub object: String,
    pub id: String,
    pub email: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetCreated {
    #[serde(default)]
    pub object: String,
    pub id: String,
    pub email: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEventData {
    #[serde(default)]
    pub object: String,
    pub id: String,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub external_key: String,
    pub state: ConnectionState,
    #[serde(default)]
    pub status: Option<ConnectionStatus>,
    #[serde(default)]
    pub domains: Vec<ConnectionDomain>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationCreated {
    #[serde(default)]
    pub object: String,
    pub id: String,
    pub email: String,
    pub state: InvitationState,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub inviter_user_id: Option<String>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_activated_payload() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{
                "id": "wh_01G69A99Z8C6AJ4XDF2KK5TV5A",
                "event": "connection.activated",
                "data": {
                    "object": "connection",
                    "id": "conn_01EHWNC0FCBHZ3BJ7EGKYXK0E6",
                    "organization_id": "org_01EHWNCE74X7JSDV0X3SZ3KJNY",
                    "state": "active",
                    "domains": [{"object": "connection_domain", "id": "conn_domain_1", "domain": "foo-corp.com"}],
                    "created_at": "2021-06-25T19:07:33.155Z"
                },
                "created_at": "2021-06-25T19:07:33.155Z"
            }"#,
        )
        .unwrap();

        match event.payload().unwrap() {
            WebhookPayload::ConnectionActivated(data) => {
                assert_eq!(data.state, ConnectionState::Active);
                assert_eq!(data.domains[0].domain, "foo-corp.com");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_passes_data_through() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"id":"wh_1","event":"dsync.user.created","data":{"foo":"bar"}}"#,
        )
        .unwrap();

        assert_eq!(
            event.payload().unwrap(),
            WebhookPayload::Other(serde_json::json!({"foo": "bar"}))
        );
        assert!(event.created_at.is_none());
    }
}
