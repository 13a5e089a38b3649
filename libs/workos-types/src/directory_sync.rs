use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{RoleResponse, null_as_default};

/// E-mail address of a directory user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryUserEmail {
    #[serde(deserialize_with = "null_as_default")]
    pub primary: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
}

/// Group membership summary embedded in a directory user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryUserGroup {
    #[serde(deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryUserState {
    #[default]
    Active,
    Inactive,
}

/// A user provisioned through directory sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: String,

    /// Identifier assigned by the directory provider
    #[serde(default)]
    pub idp_id: String,

    #[serde(default)]
    pub directory_id: String,

    #[serde(default)]
    pub organization_id: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub emails: Vec<DirectoryUserEmail>,

    #[serde(default)]
    pub groups: Vec<DirectoryUserGroup>,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub job_title: String,

    #[serde(default)]
    pub state: DirectoryUserState,

    /// Provider attributes, passed through untouched
    #[serde(default)]
    pub raw_attributes: Value,

    #[serde(default)]
    pub custom_attributes: Value,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleResponse>,
}

impl DirectoryUser {
    /// The user's primary e-mail address, if the provider flagged one.
    pub fn primary_email(&self) -> Option<&str> {
        self.emails
            .iter()
            .find(|email| email.primary)
            .map(|email| email.value.as_str())
    }
}

/// A group provisioned through directory sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryGroup {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub idp_id: String,

    #[serde(default)]
    pub directory_id: String,

    #[serde(default)]
    pub organization_id: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub raw_attributes: Value,
}

/// Directory provider type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectoryType {
    #[serde(rename = "azure scim v2.0")]
    AzureScimV2,
    #[serde(rename = "bamboohr")]
    BambooHr,
    #[serde(rename = "breathe hr")]
    BreatheHr,
    #[serde(rename = "cezanne hr")]
    CezanneHr,
    #[serde(rename = "cyberark scim v2.0")]
    CyberArk,
    #[serde(rename = "fourth hr")]
    FourthHr,
    #[serde(rename = "gsuite directory")]
    GSuiteDirectory,
    #[serde(rename = "generic scim v2.0")]
    GenericScimV2,
    #[serde(rename = "hibob")]
    Hibob,
    #[serde(rename = "jump cloud scim v2.0")]
    JumpCloud,
    #[serde(rename = "okta scim v2.0")]
    OktaScimV2,
    #[serde(rename = "onelogin scim v2.0")]
    OneLogin,
    #[serde(rename = "people hr")]
    PeopleHr,
    #[serde(rename = "personio")]
    Personio,
    #[serde(rename = "pingfederate scim v2.0")]
    PingFederate,
    #[serde(rename = "rippling scim v2.0")]
    Rippling,
    #[serde(rename = "sftp")]
    Sftp,
    #[serde(rename = "sftp workday")]
    SftpWorkday,
    #[serde(rename = "workday")]
    Workday,
    /// A provider this version of the SDK does not know about.
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryState {
    Linked,
    Unlinked,
    InvalidCredentials,
    #[serde(untagged)]
    Other(String),
}

/// A directory connected to an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub domain: String,

    #[serde(default)]
    pub external_key: String,

    #[serde(rename = "type")]
    pub kind: DirectoryType,

    pub state: DirectoryState,

    #[serde(default)]
    pub idp_id: String,

    #[serde(default)]
    pub organization_id: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_json(emails: &str) -> String {
        format!(
            r#"{{
                "id": "directory_user_id",
                "emails": {emails},
                "raw_attributes": {{"foo": "bar"}},
                "created_at": "2021-06-25T19:07:33.155Z",
                "updated_at": "2021-06-25T19:07:33.155Z"
            }}"#
        )
    }

    #[test]
    fn test_primary_email() {
        let user: DirectoryUser = serde_json::from_str(&user_json(
            r#"[{"primary": false, "value": "rosalinda@foo-corp.com", "type": "home"},
                {"primary": true, "value": "marcelina@foo-corp.com", "type": "work"}]"#,
        ))
        .unwrap();

        assert_eq!(user.primary_email(), Some("marcelina@foo-corp.com"));
        assert_eq!(user.raw_attributes["foo"], "bar");
    }

    #[test]
    fn test_primary_email_missing() {
        let user: DirectoryUser = serde_json::from_str(&user_json(
            r#"[{"primary": false, "value": "marcelina@foo-corp.com"}]"#,
        ))
        .unwrap();

        assert_eq!(user.primary_email(), None);
    }

    #[test]
    fn test_directory_type_known_and_unknown() {
        let known: DirectoryType = serde_json::from_str(r#""okta scim v2.0""#).unwrap();
        assert_eq!(known, DirectoryType::OktaScimV2);

        let unknown: DirectoryType = serde_json::from_str(r#""brand new hr""#).unwrap();
        assert_eq!(unknown, DirectoryType::Other("brand new hr".into()));
    }
}
