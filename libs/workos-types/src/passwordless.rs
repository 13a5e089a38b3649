use serde::{Deserialize, Serialize};

use crate::common::null_as_default;

/// A passwordless (magic link) session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordlessSession {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    /// E-mail of the user to authenticate
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,

    /// When the link expires (ISO 8601 format)
    #[serde(deserialize_with = "null_as_default")]
    pub expires_at: String,

    /// Link the user follows to authenticate
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PasswordlessSessionType {
    #[default]
    MagicLink,
}
