//! Error decoding for non-2xx responses.
//!
//! The API does not say up front which error shape a body has, so decoding is
//! opportunistic: try the typed authentication errors, then the generic
//! payload, and fall back to the raw body text. A body that fails to parse is
//! never reported as a parse error.

use std::fmt::Display;
use std::str::FromStr;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use workos_types::{
    AuthenticationError, EmailVerificationRequired, ErrorCode, FieldError, HttpError,
    InvalidCredentials, MfaChallenge, MfaEnrollment, OrganizationAuthenticationMethodsRequired,
    OrganizationSelectionRequired, SsoRequired,
};

use crate::error::WorkosError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Passes a 2xx response through, or consumes the body and returns the decoded error.
pub async fn check(response: Response) -> Result<Response, WorkosError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let headers = response.headers().clone();
    let body = response.bytes().await;
    Err(classify(status, &headers, body))
}

/// Builds the single error value that represents a failed response.
///
/// `body` is the result of reading the response body; a read failure becomes
/// the error message.
pub fn classify<B, E>(status: StatusCode, headers: &HeaderMap, body: Result<B, E>) -> WorkosError
where
    B: AsRef<[u8]>,
    E: Display,
{
    let context = ErrorContext {
        code: status.as_u16(),
        status: status.to_string(),
        request_id: header_str(headers, REQUEST_ID_HEADER).to_owned(),
    };

    let body = match body {
        Ok(body) => body,
        Err(e) => {
            debug!(status = %context.status, request_id = %context.request_id, error = %e, "Failed to read error response body");
            return context.error(e.to_string()).into();
        }
    };
    let body = body.as_ref();

    if !header_str(headers, CONTENT_TYPE.as_str()).contains("application/json") {
        return context.raw(body).into();
    }

    let err = if context.code == StatusCode::UNPROCESSABLE_ENTITY.as_u16() {
        decode_unprocessable(&context, body)
    } else {
        decode_json(&context, body)
    };

    debug!(
        status = %context.status,
        request_id = %context.request_id,
        authentication = err.is_authentication_error(),
        "Decoded API error response"
    );
    err
}

struct ErrorContext {
    code: u16,
    status: String,
    request_id: String,
}

impl ErrorContext {
    fn error(&self, message: String) -> HttpError {
        HttpError {
            code: self.code,
            status: self.status.clone(),
            request_id: self.request_id.clone(),
            message,
            error_code: None,
            errors: Vec::new(),
            field_errors: Vec::new(),
        }
    }

    fn raw(&self, body: &[u8]) -> HttpError {
        self.error(String::from_utf8_lossy(body).into_owned())
    }
}

// Absent and null fields both read as empty.
#[derive(Deserialize)]
struct UnprocessableEntityPayload {
    message: Option<String>,
    code: Option<String>,
    errors: Option<Vec<FieldError>>,
}

#[derive(Deserialize)]
struct ErrorPayload {
    message: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    errors: Option<Vec<String>>,
    code: Option<String>,
}

fn decode_unprocessable(context: &ErrorContext, body: &[u8]) -> WorkosError {
    let Ok(payload) = serde_json::from_slice::<UnprocessableEntityPayload>(body) else {
        return context.raw(body).into();
    };

    HttpError {
        error_code: payload.code.filter(|code| !code.is_empty()),
        field_errors: payload.errors.unwrap_or_default(),
        ..context.error(payload.message.unwrap_or_default())
    }
    .into()
}

fn decode_json(context: &ErrorContext, body: &[u8]) -> WorkosError {
    let Ok(payload) = serde_json::from_slice::<ErrorPayload>(body) else {
        return context.raw(body).into();
    };

    if let Some(kind) = select_authentication_error(payload.code.as_deref(), payload.error.as_deref())
    {
        return match decode_authentication_error(kind, body) {
            Ok(err) => err.into(),
            Err(_) => context.raw(body).into(),
        };
    }

    let message = payload.message.unwrap_or_default();
    let error = payload.error.unwrap_or_default();
    let error_description = payload.error_description.unwrap_or_default();
    let errors = payload.errors.unwrap_or_default();

    let err = if !error.is_empty() && !error_description.is_empty() {
        context.error(format!("{error} {error_description}"))
    } else if !message.is_empty() && errors.is_empty() {
        context.error(message)
    } else if !message.is_empty() {
        HttpError {
            error_code: payload.code.filter(|code| !code.is_empty()),
            errors,
            ..context.error(message)
        }
    } else {
        context.raw(body)
    };
    err.into()
}

/// Picks the authentication error named by the body, if any.
///
/// `code` is looked up first and `error` second; a match on `error` replaces
/// a match on `code`.
fn select_authentication_error(code: Option<&str>, error: Option<&str>) -> Option<ErrorCode> {
    let by_code = code
        .and_then(|code| ErrorCode::from_str(code).ok())
        .filter(|code| {
            matches!(
                code,
                ErrorCode::EmailVerificationRequired
                    | ErrorCode::MfaEnrollment
                    | ErrorCode::MfaChallenge
                    | ErrorCode::OrganizationSelectionRequired
                    | ErrorCode::InvalidCredentials
            )
        });

    let by_error = error
        .and_then(|error| ErrorCode::from_str(error).ok())
        .filter(|error| {
            matches!(
                error,
                ErrorCode::SsoRequired | ErrorCode::OrganizationAuthenticationMethodsRequired
            )
        });

    by_error.or(by_code)
}

fn decode_authentication_error(
    kind: ErrorCode,
    body: &[u8],
) -> Result<AuthenticationError, serde_json::Error> {
    fn typed<T>(body: &[u8]) -> Result<AuthenticationError, serde_json::Error>
    where
        T: DeserializeOwned + Into<AuthenticationError>,
    {
        serde_json::from_slice::<T>(body).map(Into::into)
    }

    match kind {
        ErrorCode::EmailVerificationRequired => typed::<EmailVerificationRequired>(body),
        ErrorCode::MfaEnrollment => typed::<MfaEnrollment>(body),
        ErrorCode::MfaChallenge => typed::<MfaChallenge>(body),
        ErrorCode::OrganizationSelectionRequired => typed::<OrganizationSelectionRequired>(body),
        ErrorCode::InvalidCredentials => typed::<InvalidCredentials>(body),
        ErrorCode::SsoRequired => typed::<SsoRequired>(body),
        ErrorCode::OrganizationAuthenticationMethodsRequired => {
            typed::<OrganizationAuthenticationMethodsRequired>(body)
        }
        ErrorCode::UserCreationError => Err(serde::de::Error::custom(
            "user_creation_error is not an authentication error",
        )),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
