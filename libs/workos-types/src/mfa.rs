use serde::{Deserialize, Serialize};

use crate::common::null_as_default;

/// Kind of authentication factor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorType {
    Sms,
    #[default]
    Totp,
    GenericOtp,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TotpDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub qr_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub secret: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(deserialize_with = "null_as_default")]
    pub issuer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
}

/// An enrolled authentication factor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Factor {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub object: String,

    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,

    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,

    #[serde(rename = "type")]
    pub kind: FactorType,

    /// Present for TOTP factors only
    pub totp: Option<TotpDetails>,

    /// Present for SMS factors only
    pub sms: Option<SmsDetails>,

    /// Owning user, for factors enrolled through User Management
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A challenge issued against a factor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Challenge {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub object: String,

    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,

    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,

    #[serde(deserialize_with = "null_as_default")]
    pub expires_at: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(rename = "authentication_factor_id")]
    #[serde(deserialize_with = "null_as_default")]
    pub factor_id: String,
}
