//! Client configuration.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use env_helpers::get_env_opt;
use secrecy::SecretString;
use url::Url;

use crate::error::WorkosError;

pub const DEFAULT_ENDPOINT: &str = "https://api.workos.com";

/// Default request timeout (total request/response time).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the WorkOS client.
///
/// All defaults are filled in here, so a client built from a config never
/// needs to initialise anything later.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key (e.g., "sk_live_...")
    pub api_key: SecretString,

    /// Base URL of the API (default: https://api.workos.com)
    pub endpoint: Url,

    /// Total time allowed per request (default: 10 seconds)
    pub timeout: Duration,

    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Config with the default endpoint and timeouts.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            endpoint: default_endpoint(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Reads `WORKOS_API_KEY`, `WORKOS_API_URL` and `WORKOS_TIMEOUT_SECS`.
    ///
    /// Only the API key is required. A value that does not parse is a
    /// [`WorkosError::Config`].
    pub fn from_env() -> Result<Self, WorkosError> {
        let api_key = get_env_opt("WORKOS_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| WorkosError::Config("WORKOS_API_KEY is not set".into()))?;

        let mut config = Self::new(api_key);
        if let Some(endpoint) = parse_env::<Url>("WORKOS_API_URL")? {
            config.endpoint = endpoint;
        }
        if let Some(secs) = parse_env::<u64>("WORKOS_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

fn parse_env<T>(name: &'static str) -> Result<Option<T>, WorkosError>
where
    T: FromStr,
    T::Err: Display,
{
    get_env_opt(name)
        .map(|value| {
            value
                .parse()
                .map_err(|e| WorkosError::Config(format!("invalid {name}: {e}")))
        })
        .transpose()
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}
