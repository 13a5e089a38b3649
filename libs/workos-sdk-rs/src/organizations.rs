//! Organizations API.

use serde::Serialize;
use workos_types::organizations::{Organization, OrganizationDomainData};
use workos_types::{ListResponse, Order};

use crate::client::{ApiRequest, Query, WorkosClient};
use crate::error::WorkosError;

/// Filters for [`Organizations::list_organizations`].
#[derive(Debug, Clone, Default)]
pub struct ListOrganizationsOpts {
    /// Only organizations with one of these domains
    pub domains: Vec<String>,

    /// Defaults to 10
    pub limit: Option<u32>,

    pub before: Option<String>,

    pub after: Option<String>,

    pub order: Order,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOrganizationOpts {
    pub name: String,

    /// Deprecated upstream, use `domain_data`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domain_data: Vec<OrganizationDomainData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_profiles_outside_organization: Option<bool>,

    /// Sent as the `Idempotency-Key` header
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOrganizationOpts {
    #[serde(skip)]
    pub organization: String,

    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domain_data: Vec<OrganizationDomainData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_profiles_outside_organization: Option<bool>,
}

/// Organizations endpoints, obtained from [`WorkosClient::organizations`].
#[derive(Debug, Clone, Copy)]
pub struct Organizations<'a> {
    client: &'a WorkosClient,
}

impl<'a> Organizations<'a> {
    pub(crate) fn new(client: &'a WorkosClient) -> Self {
        Self { client }
    }

    pub async fn get_organization(&self, organization: &str) -> Result<Organization, WorkosError> {
        self.client
            .send(ApiRequest::get(&["organizations", organization]))
            .await
    }

    pub async fn list_organizations(
        &self,
        opts: &ListOrganizationsOpts,
    ) -> Result<ListResponse<Organization>, WorkosError> {
        let query = Query::new()
            .push_all("domains", &opts.domains)
            .page(
                opts.limit,
                opts.order,
                opts.before.as_deref(),
                opts.after.as_deref(),
            );

        self.client
            .send(ApiRequest::get(&["organizations"]).query(query))
            .await
    }

    pub async fn create_organization(
        &self,
        opts: &CreateOrganizationOpts,
    ) -> Result<Organization, WorkosError> {
        let request = ApiRequest::post(&["organizations"])
            .json(opts)?
            .idempotency_key(opts.idempotency_key.as_deref());
        self.client.send(request).await
    }

    pub async fn update_organization(
        &self,
        opts: &UpdateOrganizationOpts,
    ) -> Result<Organization, WorkosError> {
        let request = ApiRequest::put(&["organizations", opts.organization.as_str()]).json(opts)?;
        self.client.send(request).await
    }

    pub async fn delete_organization(&self, organization: &str) -> Result<(), WorkosError> {
        self.client
            .send_empty(ApiRequest::delete(&["organizations", organization]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::test_client;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use workos_types::organizations::{OrganizationDomain, OrganizationDomainState};

    fn foo_corp_json() -> serde_json::Value {
        json!({
            "id": "organization_id",
            "name": "Foo Corp",
            "allow_profiles_outside_organization": false,
            "domains": [{"id": "organization_domain_id", "domain": "foo-corp.com"}]
        })
    }

    fn foo_corp() -> Organization {
        Organization {
            id: "organization_id".into(),
            name: "Foo Corp".into(),
            domains: vec![OrganizationDomain {
                id: "organization_domain_id".into(),
                domain: "foo-corp.com".into(),
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_organization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations/organization_id"))
            .and(header("Authorization", "Bearer test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(foo_corp_json()))
            .mount(&server)
            .await;

        let org = test_client(&server)
            .organizations()
            .get_organization("organization_id")
            .await
            .unwrap();

        assert_eq!(org, foo_corp());
    }

    #[tokio::test]
    async fn test_list_organizations_applies_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [foo_corp_json()],
                "list_metadata": {"before": "", "after": ""}
            })))
            .mount(&server)
            .await;

        let opts = ListOrganizationsOpts {
            domains: vec!["foo-corp.com".into(), "bar.com".into()],
            ..Default::default()
        };
        let page = test_client(&server)
            .organizations()
            .list_organizations(&opts)
            .await
            .unwrap();

        assert_eq!(page.data, vec![foo_corp()]);

        let received = server.received_requests().await.unwrap();
        assert_eq!(
            received[0].url.query(),
            Some("domains=foo-corp.com&domains=bar.com&limit=10&order=desc")
        );
    }

    #[tokio::test]
    async fn test_create_organization_with_idempotency_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/organizations"))
            .and(header("Idempotency-Key", "key_1"))
            .and(body_json(json!({
                "name": "Foo Corp",
                "domain_data": [{"domain": "foo-corp.com", "state": "verified"}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(foo_corp_json()))
            .expect(1)
            .mount(&server)
            .await;

        let opts = CreateOrganizationOpts {
            name: "Foo Corp".into(),
            domain_data: vec![OrganizationDomainData {
                domain: "foo-corp.com".into(),
                state: OrganizationDomainState::Verified,
            }],
            idempotency_key: Some("key_1".into()),
            ..Default::default()
        };
        let org = test_client(&server)
            .organizations()
            .create_organization(&opts)
            .await
            .unwrap();

        assert_eq!(org.name, "Foo Corp");
    }

    #[tokio::test]
    async fn test_create_organization_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/organizations"))
            .respond_with(
                ResponseTemplate::new(409).set_body_string("duplicate idempotency key"),
            )
            .mount(&server)
            .await;

        let err = test_client(&server)
            .organizations()
            .create_organization(&CreateOrganizationOpts {
                name: "New Corp".into(),
                idempotency_key: Some("duplicate".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        let http = err.as_http_error().unwrap();
        assert_eq!(http.code, 409);
        assert_eq!(http.message, "duplicate idempotency key");
    }

    #[tokio::test]
    async fn test_update_organization() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/organizations/organization_id"))
            .and(body_json(json!({"name": "Foo Corp", "domains": ["foo-corp.com"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(foo_corp_json()))
            .expect(1)
            .mount(&server)
            .await;

        let org = test_client(&server)
            .organizations()
            .update_organization(&UpdateOrganizationOpts {
                organization: "organization_id".into(),
                name: "Foo Corp".into(),
                domains: vec!["foo-corp.com".into()],
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(org, foo_corp());
    }

    #[tokio::test]
    async fn test_delete_organization() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/organizations/organization_id"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .organizations()
            .delete_organization("organization_id")
            .await
            .unwrap();
    }
}
