use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CONNECTION_ACTIVATED: &str = "connection.activated";
pub const CONNECTION_DEACTIVATED: &str = "connection.deactivated";
pub const CONNECTION_DELETED: &str = "connection.deleted";
pub const DIRECTORY_ACTIVATED: &str = "dsync.activated";
pub const DIRECTORY_DELETED: &str = "dsync.deleted";
pub const DIRECTORY_USER_CREATED: &str = "dsync.user.created";
pub const DIRECTORY_USER_UPDATED: &str = "dsync.user.updated";
pub const DIRECTORY_USER_DELETED: &str = "dsync.user.deleted";
pub const DIRECTORY_GROUP_CREATED: &str = "dsync.group.created";
pub const DIRECTORY_GROUP_UPDATED: &str = "dsync.group.updated";
pub const DIRECTORY_GROUP_DELETED: &str = "dsync.group.deleted";
pub const DIRECTORY_GROUP_USER_ADDED: &str = "dsync.group.user_added";
pub const DIRECTORY_GROUP_USER_REMOVED: &str = "dsync.group.user_removed";
pub const USER_CREATED: &str = "user.created";
pub const USER_UPDATED: &str = "user.updated";
pub const USER_DELETED: &str = "user.deleted";
pub const ORGANIZATION_MEMBERSHIP_CREATED: &str = "organization_membership.created";
pub const ORGANIZATION_MEMBERSHIP_DELETED: &str = "organization_membership.deleted";
pub const ORGANIZATION_MEMBERSHIP_UPDATED: &str = "organization_membership.updated";
pub const SESSION_CREATED: &str = "session.created";
pub const EMAIL_VERIFICATION_CREATED: &str = "email_verification.created";
pub const INVITATION_CREATED: &str = "invitation.created";
pub const MAGIC_AUTH_CREATED: &str = "magic_auth.created";
pub const PASSWORD_RESET_CREATED: &str = "password_reset.created";

/// An entry from the events API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,

    /// Event name, e.g. "dsync.user.created"
    pub event: String,

    /// Event payload, passed through untouched
    #[serde(default)]
    pub data: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
