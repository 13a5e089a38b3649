use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display};

/// Default number of records returned by list endpoints.
pub const RESPONSE_LIMIT: u32 = 10;

/// Reads JSON `null` as the default value, the same as a missing field.
///
/// The API sends `null` for unset strings (e.g. a user's `first_name`).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Sort order for paginated list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

/// Cursor pagination metadata attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMetadata {
    /// Cursor for the previous page, when there is one.
    pub before: Option<String>,

    /// Cursor for the next page, when there is one.
    pub after: Option<String>,
}

/// A page of records from a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,

    #[serde(default, rename = "list_metadata", alias = "listMetadata")]
    pub list_metadata: ListMetadata,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            list_metadata: ListMetadata::default(),
        }
    }
}

/// Role assigned to a membership or directory user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
}
