//! Webhook signature verification.
//!
//! Deliveries carry a `WorkOS-Signature` header of the form
//! `t=<unix millis>, v1=<hex hmac>`, where the HMAC-SHA256 is taken over
//! `"{t}.{body}"` with the endpoint's webhook secret.

use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;
use workos_types::webhooks::WebhookEvent;

use crate::error::WorkosError;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "WorkOS-Signature";

/// How old a delivery may be before it is rejected.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(180);

/// Build a signature header for `payload`.
///
/// Mostly useful for tests of webhook receivers.
pub fn sign_payload(secret: &str, timestamp_ms: i64, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{timestamp_ms}.{payload}").as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("t={timestamp_ms}, v1={signature}")
}

/// Check that `signature_header` was produced for `payload` with `secret`
/// no longer than `tolerance` ago.
pub fn verify_header(
    payload: &str,
    signature_header: &str,
    secret: &str,
    tolerance: Duration,
) -> Result<(), WorkosError> {
    let parsed = SignatureHeader::parse(signature_header)?;

    let age_ms = Utc::now().timestamp_millis() - parsed.timestamp_ms;
    if age_ms > i64::try_from(tolerance.as_millis()).unwrap_or(i64::MAX) {
        debug!(age_ms, "Rejecting stale webhook");
        return Err(WorkosError::WebhookSignature(
            "timestamp outside the tolerance zone".into(),
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| WorkosError::WebhookSignature(e.to_string()))?;
    mac.update(parsed.timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());

    // Any v1 entry may match.
    let matched = parsed
        .signatures
        .iter()
        .filter_map(|sig| hex::decode(sig).ok())
        .any(|sig| mac.clone().verify_slice(&sig).is_ok());
    if !matched {
        debug!("Webhook signature mismatch");
        return Err(WorkosError::WebhookSignature(
            "signature hash does not match the expected hash".into(),
        ));
    }
    Ok(())
}

/// Verify a delivery and decode it.
pub fn construct_event(
    payload: &str,
    signature_header: &str,
    secret: &str,
    tolerance: Duration,
) -> Result<WebhookEvent, WorkosError> {
    verify_header(payload, signature_header, secret, tolerance)?;
    Ok(serde_json::from_str(payload)?)
}

struct SignatureHeader<'a> {
    timestamp: &'a str,
    timestamp_ms: i64,
    signatures: Vec<&'a str>,
}

impl<'a> SignatureHeader<'a> {
    fn parse(header: &'a str) -> Result<Self, WorkosError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = Some(value),
                Some(("v1", value)) => signatures.push(value),
                _ => {}
            }
        }

        let Some(timestamp) = timestamp.filter(|_| !signatures.is_empty()) else {
            return Err(WorkosError::WebhookSignature(
                "unable to extract timestamp and signature hash from header".into(),
            ));
        };
        let timestamp_ms = timestamp
            .parse()
            .map_err(|_| WorkosError::WebhookSignature(format!("invalid timestamp: {timestamp}")))?;

        Ok(Self {
            timestamp,
            timestamp_ms,
            signatures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const PAYLOAD: &str = r#"{"id":"wh_01G69A99Z8C6AJ4XDF2KK5TV5A","event":"dsync.user.created","data":{"foo":"bar"},"created_at":"2021-06-25T19:07:33.155Z"}"#;

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    #[test]
    fn test_signature_has_correct_format() {
        let header = sign_payload(SECRET, 1706500000000, PAYLOAD);
        let hex_part = header.strip_prefix("t=1706500000000, v1=").unwrap();
        assert_eq!(hex_part.len(), 64);
        assert!(hex_part.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verify_valid_signature() {
        let header = sign_payload(SECRET, now_ms(), PAYLOAD);
        verify_header(PAYLOAD, &header, SECRET, DEFAULT_TOLERANCE).unwrap();
    }

    #[test]
    fn test_verify_wrong_secret() {
        let header = sign_payload("whsec_other", now_ms(), PAYLOAD);
        let err = verify_header(PAYLOAD, &header, SECRET, DEFAULT_TOLERANCE).unwrap_err();
        assert!(matches!(err, WorkosError::WebhookSignature(_)));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let header = sign_payload(SECRET, now_ms(), PAYLOAD);
        let tampered = PAYLOAD.replace("bar", "baz");
        let err = verify_header(&tampered, &header, SECRET, DEFAULT_TOLERANCE).unwrap_err();
        assert!(matches!(err, WorkosError::WebhookSignature(_)));
    }

    #[test]
    fn test_verify_malformed_header() {
        for header in ["", "v1=abcd", "t=123", "t=abc, v1=abcd", "garbage"] {
            let err = verify_header(PAYLOAD, header, SECRET, DEFAULT_TOLERANCE).unwrap_err();
            assert!(
                matches!(err, WorkosError::WebhookSignature(_)),
                "header {header:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_verify_accepts_any_listed_signature() {
        let ts = now_ms();
        let current = sign_payload(SECRET, ts, PAYLOAD);
        let old = sign_payload("whsec_old_secret", ts, PAYLOAD);
        let old_sig = old.split("v1=").nth(1).unwrap();

        let header = format!("{current}, v1={old_sig}");
        verify_header(PAYLOAD, &header, SECRET, DEFAULT_TOLERANCE).unwrap();
        verify_header(PAYLOAD, &header, "whsec_old_secret", DEFAULT_TOLERANCE).unwrap();
    }

    #[test]
    fn test_verify_stale_timestamp() {
        let stale = now_ms() - 181_000;
        let header = sign_payload(SECRET, stale, PAYLOAD);
        let err = verify_header(PAYLOAD, &header, SECRET, DEFAULT_TOLERANCE).unwrap_err();
        assert!(matches!(err, WorkosError::WebhookSignature(_)));

        verify_header(PAYLOAD, &header, SECRET, Duration::from_secs(300)).unwrap();
    }

    #[test]
    fn test_construct_event() {
        let header = sign_payload(SECRET, now_ms(), PAYLOAD);
        let event = construct_event(PAYLOAD, &header, SECRET, DEFAULT_TOLERANCE).unwrap();

        assert_eq!(event.id, "wh_01G69A99Z8C6AJ4XDF2KK5TV5A");
        assert_eq!(event.event, "dsync.user.created");
        assert_eq!(event.data["foo"], "bar");
    }

    #[test]
    fn test_construct_event_rejects_before_decoding() {
        let header = sign_payload("whsec_other", now_ms(), "not json");
        let err = construct_event("not json", &header, SECRET, DEFAULT_TOLERANCE).unwrap_err();
        assert!(matches!(err, WorkosError::WebhookSignature(_)));
    }
}
