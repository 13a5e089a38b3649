//! Multi-factor authentication API.

use serde::{Deserialize, Serialize};
use workos_types::mfa::{Challenge, Factor, FactorType};

use crate::client::{ApiRequest, WorkosClient};
use crate::error::WorkosError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct EnrollFactorOpts {
    #[serde(rename = "type")]
    pub kind: FactorType,

    /// Required for TOTP factors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totp_issuer: Option<String>,

    /// Required for TOTP factors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totp_user: Option<String>,

    /// Required for SMS factors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl EnrollFactorOpts {
    fn validate(&self) -> Result<(), WorkosError> {
        fn missing(value: &Option<String>) -> bool {
            value.as_deref().is_none_or(str::is_empty)
        }

        match self.kind {
            FactorType::Sms if missing(&self.phone_number) => Err(WorkosError::InvalidRequest(
                "incomplete arguments: missing phone number for SMS".into(),
            )),
            FactorType::Totp if missing(&self.totp_issuer) || missing(&self.totp_user) => {
                Err(WorkosError::InvalidRequest(
                    "incomplete arguments: missing issuer and user for TOTP".into(),
                ))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChallengeFactorOpts {
    #[serde(skip)]
    pub factor_id: String,

    /// Message template for SMS factors, `{{code}}` is replaced with the code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_template: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyChallengeOpts {
    #[serde(skip)]
    pub challenge_id: String,

    pub code: String,
}

/// Result of [`Mfa::verify_challenge`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct VerifyChallengeResponse {
    pub challenge: Challenge,
    pub valid: bool,
}

/// MFA endpoints, obtained from [`WorkosClient::mfa`].
#[derive(Debug, Clone, Copy)]
pub struct Mfa<'a> {
    client: &'a WorkosClient,
}

impl<'a> Mfa<'a> {
    pub(crate) fn new(client: &'a WorkosClient) -> Self {
        Self { client }
    }

    /// Enroll a TOTP or SMS factor.
    ///
    /// Missing TOTP issuer/user or SMS phone number is rejected before any
    /// request is made.
    pub async fn enroll_factor(&self, opts: &EnrollFactorOpts) -> Result<Factor, WorkosError> {
        opts.validate()?;

        let request = ApiRequest::post(&["auth", "factors", "enroll"]).json(opts)?;
        self.client.send(request).await
    }

    pub async fn challenge_factor(
        &self,
        opts: &ChallengeFactorOpts,
    ) -> Result<Challenge, WorkosError> {
        let request =
            ApiRequest::post(&["auth", "factors", opts.factor_id.as_str(), "challenge"]).json(opts)?;
        self.client.send(request).await
    }

    pub async fn verify_challenge(
        &self,
        opts: &VerifyChallengeOpts,
    ) -> Result<VerifyChallengeResponse, WorkosError> {
        let request =
            ApiRequest::post(&["auth", "challenges", opts.challenge_id.as_str(), "verify"])
                .json(opts)?;
        self.client.send(request).await
    }

    pub async fn get_factor(&self, factor_id: &str) -> Result<Factor, WorkosError> {
        self.client
            .send(ApiRequest::get(&["auth", "factors", factor_id]))
            .await
    }

    pub async fn delete_factor(&self, factor_id: &str) -> Result<(), WorkosError> {
        self.client
            .send_empty(ApiRequest::delete(&["auth", "factors", factor_id]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::test_client;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn factor_json() -> serde_json::Value {
        json!({
            "object": "authentication_factor",
            "id": "auth_factor_test123",
            "created_at": "2022-02-17T22:39:26.616Z",
            "updated_at": "2022-02-17T22:39:26.616Z",
            "type": "totp",
            "totp": {
                "issuer": "WorkOS",
                "user": "some_user",
                "qr_code": "data:image/png;base64,AAAA",
                "secret": "NAGCCFS3EYRB422HNAKAKY3XDUORMSRF",
                "uri": "otpauth://totp/WorkOS:some_user?secret=NAGCCFS3EYRB422HNAKAKY3XDUORMSRF"
            }
        })
    }

    fn challenge_json() -> serde_json::Value {
        json!({
            "object": "authentication_challenge",
            "id": "auth_challenge_test123",
            "created_at": "2022-02-17T22:39:26.616Z",
            "updated_at": "2022-02-17T22:39:26.616Z",
            "expires_at": "2022-02-17T22:49:26.616Z",
            "authentication_factor_id": "auth_factor_test123"
        })
    }

    #[tokio::test]
    async fn test_enroll_totp_factor() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/factors/enroll"))
            .and(body_json(json!({
                "type": "totp",
                "totp_issuer": "WorkOS",
                "totp_user": "some_user"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(factor_json()))
            .expect(1)
            .mount(&server)
            .await;

        let factor = test_client(&server)
            .mfa()
            .enroll_factor(&EnrollFactorOpts {
                kind: FactorType::Totp,
                totp_issuer: Some("WorkOS".into()),
                totp_user: Some("some_user".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(factor.id, "auth_factor_test123");
        assert_eq!(factor.kind, FactorType::Totp);
        assert_eq!(factor.totp.unwrap().issuer, "WorkOS");
    }

    #[tokio::test]
    async fn test_enroll_rejects_incomplete_arguments_before_sending() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let sms = EnrollFactorOpts {
            kind: FactorType::Sms,
            ..Default::default()
        };
        let err = client.mfa().enroll_factor(&sms).await.unwrap_err();
        assert!(matches!(err, WorkosError::InvalidRequest(_)));

        let totp = EnrollFactorOpts {
            kind: FactorType::Totp,
            totp_issuer: Some("WorkOS".into()),
            totp_user: Some(String::new()),
            ..Default::default()
        };
        let err = client.mfa().enroll_factor(&totp).await.unwrap_err();
        assert!(matches!(err, WorkosError::InvalidRequest(_)));

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_challenge_factor() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/factors/auth_factor_test123/challenge"))
            .and(body_json(json!({"sms_template": "Your code is {{code}}"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(challenge_json()))
            .expect(1)
            .mount(&server)
            .await;

        let challenge = test_client(&server)
            .mfa()
            .challenge_factor(&ChallengeFactorOpts {
                factor_id: "auth_factor_test123".into(),
                sms_template: Some("Your code is {{code}}".into()),
            })
            .await
            .unwrap();

        assert_eq!(challenge.id, "auth_challenge_test123");
        assert_eq!(challenge.factor_id, "auth_factor_test123");
    }

    #[tokio::test]
    async fn test_verify_challenge() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/challenges/auth_challenge_test123/verify"))
            .and(body_json(json!({"code": "0000000"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "challenge": challenge_json(),
                "valid": true
            })))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .mfa()
            .verify_challenge(&VerifyChallengeOpts {
                challenge_id: "auth_challenge_test123".into(),
                code: "0000000".into(),
            })
            .await
            .unwrap();

        assert!(response.valid);
        assert_eq!(response.challenge.id, "auth_challenge_test123");
    }

    #[tokio::test]
    async fn test_verify_expired_challenge() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/challenges/auth_challenge_test123/verify"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": "authentication_challenge_expired",
                "message": "The authentication challenge has expired."
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .mfa()
            .verify_challenge(&VerifyChallengeOpts {
                challenge_id: "auth_challenge_test123".into(),
                code: "0000000".into(),
            })
            .await
            .unwrap_err();

        let http = err.as_http_error().unwrap();
        assert_eq!(http.code, 422);
        assert_eq!(http.message, "The authentication challenge has expired.");
        assert_eq!(
            http.error_code.as_deref(),
            Some("authentication_challenge_expired")
        );
    }

    #[tokio::test]
    async fn test_get_and_delete_factor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/factors/auth_factor_test123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(factor_json()))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/auth/factors/auth_factor_test123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let factor = client.mfa().get_factor("auth_factor_test123").await.unwrap();
        assert_eq!(factor.object, "authentication_factor");

        client
            .mfa()
            .delete_factor("auth_factor_test123")
            .await
            .unwrap();
    }
}
