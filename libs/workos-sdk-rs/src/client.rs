//! WorkOS client and request dispatch.

use std::fmt::Display;

use reqwest::{Method, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Span, debug, instrument};
use url::Url;
use workos_types::{Order, RESPONSE_LIMIT};

use crate::audit_logs::AuditLogs;
use crate::config::ClientConfig;
use crate::directory_sync::DirectorySync;
use crate::error::WorkosError;
use crate::events::Events;
use crate::http_error::{self, REQUEST_ID_HEADER};
use crate::mfa::Mfa;
use crate::organizations::Organizations;
use crate::passwordless::Passwordless;
use crate::user_management::UserManagement;

/// Value sent in the `User-Agent` header.
pub const USER_AGENT: &str = concat!("workos-rust/", env!("CARGO_PKG_VERSION"));

const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// WorkOS API client.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
/// ```rust,ignore
/// let client = WorkosClient::new(ClientConfig::new("sk_test_..."))?;
/// let org = client.organizations().get_organization("org_123").await?;
/// ```
#[derive(Debug, Clone)]
pub struct WorkosClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl WorkosClient {
    /// Create a new client.
    ///
    /// Fails with [`WorkosError::Config`] when the API key is empty or the
    /// endpoint cannot carry a path.
    pub fn new(config: ClientConfig) -> Result<Self, WorkosError> {
        if config.api_key.expose_secret().is_empty() {
            return Err(WorkosError::Config(
                "api key is required. Get one from the WorkOS dashboard.".into(),
            ));
        }

        if config.endpoint.cannot_be_a_base() {
            return Err(WorkosError::Config(format!(
                "endpoint {} cannot be used as a base URL",
                config.endpoint
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Client configured from `WORKOS_*` environment variables.
    pub fn from_env() -> Result<Self, WorkosError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn organizations(&self) -> Organizations<'_> {
        Organizations::new(self)
    }

    pub fn directory_sync(&self) -> DirectorySync<'_> {
        DirectorySync::new(self)
    }

    pub fn mfa(&self) -> Mfa<'_> {
        Mfa::new(self)
    }

    pub fn passwordless(&self) -> Passwordless<'_> {
        Passwordless::new(self)
    }

    pub fn user_management(&self) -> UserManagement<'_> {
        UserManagement::new(self)
    }

    pub fn audit_logs(&self) -> AuditLogs<'_> {
        AuditLogs::new(self)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    /// Endpoint joined with the given path segments, each percent-encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, WorkosError> {
        let mut url = self.config.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                WorkosError::Config(format!(
                    "endpoint {} cannot be used as a base URL",
                    self.config.endpoint
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn api_key(&self) -> &str {
        self.config.api_key.expose_secret()
    }

    /// Send a request and decode the JSON body of a successful response.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest<'_>,
    ) -> Result<T, WorkosError> {
        let response = self.execute(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request whose successful response carries nothing of interest.
    pub(crate) async fn send_empty(&self, request: ApiRequest<'_>) -> Result<(), WorkosError> {
        self.execute(request).await?;
        Ok(())
    }

    #[instrument(
        name = "workos_request",
        skip_all,
        fields(method = %request.method, path = %request.path(), status, request_id)
    )]
    async fn execute(&self, request: ApiRequest<'_>) -> Result<Response, WorkosError> {
        let url = self.url(&request.segments)?;

        let mut builder = self
            .http_client
            .request(request.method, url)
            .bearer_auth(self.api_key());

        if !request.query.is_empty() {
            builder = builder.query(request.query.pairs());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(key) = request.idempotency_key.filter(|k| !k.is_empty()) {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, key);
        }

        let response = builder.send().await?;

        let span = Span::current();
        span.record("status", response.status().as_u16());
        if let Some(id) = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            span.record("request_id", id);
        }
        debug!(status = %response.status(), "WorkOS responded");

        http_error::check(response).await
    }
}

/// A request to one API endpoint, before it is sent.
#[derive(Debug)]
pub(crate) struct ApiRequest<'a> {
    method: Method,
    segments: Vec<&'a str>,
    query: Query,
    body: Option<Value>,
    idempotency_key: Option<&'a str>,
}

impl<'a> ApiRequest<'a> {
    pub(crate) fn new(method: Method, segments: &[&'a str]) -> Self {
        Self {
            method,
            segments: segments.to_vec(),
            query: Query::default(),
            body: None,
            idempotency_key: None,
        }
    }

    pub(crate) fn get(segments: &[&'a str]) -> Self {
        Self::new(Method::GET, segments)
    }

    pub(crate) fn post(segments: &[&'a str]) -> Self {
        Self::new(Method::POST, segments)
    }

    pub(crate) fn put(segments: &[&'a str]) -> Self {
        Self::new(Method::PUT, segments)
    }

    pub(crate) fn delete(segments: &[&'a str]) -> Self {
        Self::new(Method::DELETE, segments)
    }

    pub(crate) fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub(crate) fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, WorkosError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach an idempotency key. Empty keys are not sent.
    pub(crate) fn idempotency_key(mut self, key: Option<&'a str>) -> Self {
        self.idempotency_key = key;
        self
    }

    fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Query string pairs, kept in insertion order.
///
/// List filters become repeated keys (`domains=a&domains=b`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Query(Vec<(&'static str, String)>);

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(mut self, key: &'static str, value: impl Display) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    /// Push `value` unless it is `None` or an empty string.
    pub(crate) fn push_opt<V: AsRef<str>>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) if !v.as_ref().is_empty() => self.push(key, v.as_ref()),
            _ => self,
        }
    }

    pub(crate) fn push_all<I>(mut self, key: &'static str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.0
            .extend(values.into_iter().map(|v| (key, v.to_string())));
        self
    }

    /// Cursor pagination parameters. `limit` defaults to 10.
    pub(crate) fn page(
        self,
        limit: Option<u32>,
        order: Order,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Self {
        self.push("limit", limit.unwrap_or(RESPONSE_LIMIT))
            .push("order", order)
            .push_opt("before", before)
            .push_opt("after", after)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn test_client(server: &MockServer) -> WorkosClient {
        let config = ClientConfig::new("test").with_endpoint(Url::parse(&server.uri()).unwrap());
        WorkosClient::new(config).unwrap()
    }

    #[test]
    fn test_config_validation_empty_api_key() {
        let result = WorkosClient::new(ClientConfig::new(""));
        assert!(matches!(result, Err(WorkosError::Config(_))));
    }

    #[test]
    fn test_config_validation_non_base_endpoint() {
        let config =
            ClientConfig::new("sk_test").with_endpoint(Url::parse("mailto:ops@example.com").unwrap());
        assert!(matches!(
            WorkosClient::new(config),
            Err(WorkosError::Config(_))
        ));
    }

    #[test]
    fn test_url_encodes_segments() {
        let client = WorkosClient::new(ClientConfig::new("sk_test")).unwrap();

        let url = client.url(&["organizations", "org 1/2"]).unwrap();
        assert_eq!(url.as_str(), "https://api.workos.com/organizations/org%201%2F2");
    }

    #[test]
    fn test_url_keeps_endpoint_path_prefix() {
        let config = ClientConfig::new("sk_test")
            .with_endpoint(Url::parse("https://proxy.example.com/workos/").unwrap());
        let client = WorkosClient::new(config).unwrap();

        let url = client.url(&["directories", "directory_1"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://proxy.example.com/workos/directories/directory_1"
        );
    }

    #[test]
    fn test_query_skips_empty_values() {
        let query = Query::new()
            .push("limit", 10)
            .push_opt("before", None::<&str>)
            .push_opt("after", Some(""))
            .push_opt("search", Some("foo"))
            .push_all("domains", ["a.com", "b.com"]);

        assert_eq!(
            query.pairs(),
            &[
                ("limit", "10".to_string()),
                ("search", "foo".to_string()),
                ("domains", "a.com".to_string()),
                ("domains", "b.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_user_agent_carries_crate_version() {
        assert!(USER_AGENT.starts_with("workos-rust/"));
        assert!(USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_request_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/things"))
            .and(header("Authorization", "Bearer test"))
            .and(header("Content-Type", "application/json"))
            .and(header("Idempotency-Key", "key_1"))
            .and(body_json(serde_json::json!({"name": "thing"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = ApiRequest::post(&["things"])
            .json(&serde_json::json!({"name": "thing"}))
            .unwrap()
            .idempotency_key(Some("key_1"));
        client.send_empty(request).await.unwrap();

        let received = server.received_requests().await.unwrap();
        let user_agent = received[0].headers.get("user-agent").unwrap().to_str().unwrap();
        assert!(user_agent.contains("workos-rust/"));
    }

    #[tokio::test]
    async fn test_empty_idempotency_key_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/things"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .send_empty(ApiRequest::post(&["things"]).idempotency_key(Some("")))
            .await
            .unwrap();
        client
            .send_empty(ApiRequest::post(&["things"]).idempotency_key(None))
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 2);
        for request in received {
            assert!(!request.headers.contains_key("idempotency-key"));
        }
    }

    #[tokio::test]
    async fn test_query_sent_with_repeated_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/things"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let query = Query::new().push("limit", 10).push_all("tag", ["a", "b"]);
        client
            .send_empty(ApiRequest::get(&["things"]).query(query))
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), Some("limit=10&tag=a&tag=b"));
    }

    #[tokio::test]
    async fn test_error_response_is_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/things/thing_1"))
            .respond_with(
                ResponseTemplate::new(400)
                    .insert_header("X-Request-ID", "req_1")
                    .set_body_json(serde_json::json!({"message": "bad thing"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .send::<Value>(ApiRequest::get(&["things", "thing_1"]))
            .await
            .unwrap_err();

        assert!(err.is_bad_request());
        let http = err.as_http_error().unwrap();
        assert_eq!(http.request_id, "req_1");
        assert_eq!(http.message, "bad thing");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Thing {
            id: String,
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .send::<Thing>(ApiRequest::get(&["things"]))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkosError::Decode(_)));
    }
}
