use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::null_as_default;

/// Free-form metadata attached to audit log events, actors and targets.
pub type Metadata = HashMap<String, Value>;

/// An audit log event to record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditLogEvent {
    /// The activity performed by the actor, e.g. "user.signed_in"
    pub action: String,

    /// Schema version of the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// When the event happened. Filled with the current time when left empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,

    pub actor: AuditLogEventActor,

    pub targets: Vec<AuditLogEventTarget>,

    pub context: AuditLogEventContext,

    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

/// Where the event was fired from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditLogEventContext {
    pub location: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditLogEventTarget {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

/// The entity that generated the event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditLogEventActor {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuditLogExportState {
    Ready,
    #[default]
    Pending,
    Error,
}

/// An export of audit log events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditLogExport {
    /// Always "audit_log_export"
    #[serde(deserialize_with = "null_as_default")]
    pub object: String,

    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    pub state: AuditLogExportState,

    /// Download URL, set once the export is ready
    pub url: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,

    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}
