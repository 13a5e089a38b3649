use serde::{Deserialize, Serialize};

use crate::common::null_as_default;

/// A domain attached to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationDomain {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Whether connections accept profiles outside the organization's email domains.
    /// Deprecated upstream.
    #[serde(deserialize_with = "null_as_default")]
    pub allow_profiles_outside_organization: bool,

    #[serde(deserialize_with = "null_as_default")]
    pub domains: Vec<OrganizationDomain>,

    /// When the organization was created (ISO 8601 format)
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,

    /// When the organization was last updated (ISO 8601 format)
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationDomainState {
    Verified,
    #[default]
    Pending,
}

/// Domain plus verification state, used when creating or updating an organization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrganizationDomainData {
    pub domain: String,
    pub state: OrganizationDomainState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_serde() {
        let org = Organization {
            id: "organization_id".to_string(),
            name: "Foo Corp".to_string(),
            allow_profiles_outside_organization: false,
            domains: vec![OrganizationDomain {
                id: "organization_domain_id".to_string(),
                domain: "foo-corp.com".to_string(),
            }],
            ..Default::default()
        };

        let json = serde_json::to_string(&org).unwrap();
        let parsed: Organization = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, org);
    }

    #[test]
    fn test_domain_data_state() {
        let data = OrganizationDomainData {
            domain: "foo-corp.com".into(),
            state: OrganizationDomainState::Verified,
        };
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"domain":"foo-corp.com","state":"verified"}"#
        );
    }
}
