use std::{str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use url::Url;
use veil::Redact;

#[cfg(not(test))]
const ENV_PREFIXES: &[&str] = &["OVH_"];
#[cfg(test)]
const ENV_PREFIXES: &[&str] = &["OVH_TEST_"];

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct DynAppConfig {
    #[serde(flatten)]
    pub client: ClientConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct DebugConfig {
    /// Include source file and line number in log events.
    #[serde(default)]
    pub extended_logs: bool,
}

impl DynAppConfig {
    /// Load the configuration from `OVH_*` environment variables.
    ///
    /// Nested keys are separated by `__`, e.g. `OVH_DEBUG__EXTENDED_LOGS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = figment::providers::Serialized::defaults(DynAppConfig::default());

        let mut config = figment::Figment::from(defaults);
        for prefix in ENV_PREFIXES {
            let env = figment::providers::Env::prefixed(prefix).split("__");
            config = config.merge(env);
        }

        config
            .extract::<DynAppConfig>()
            .map_err(|e| ConfigError::Extract(Box::new(e)))
    }
}

/// Connection settings of the OVH api client.
#[derive(Clone, Serialize, Deserialize, PartialEq, Redact)]
pub struct ClientConfig {
    /// Api endpoint. Either a known alias such as `ovh-eu` or an absolute url.
    #[serde(default)]
    pub endpoint: OvhEndpoint,
    pub application_key: Option<String>,
    #[redact]
    pub application_secret: Option<String>,
    #[redact]
    pub consumer_key: Option<String>,
    /// Timeout of a single HTTP request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: OvhEndpoint::default(),
            application_key: None,
            application_secret: None,
            consumer_key: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    180
}

/// Credentials required to sign a request.
#[derive(Clone, Redact)]
pub(crate) struct Credentials {
    pub(crate) application_key: String,
    #[redact]
    pub(crate) application_secret: String,
    #[redact]
    pub(crate) consumer_key: String,
}

impl ClientConfig {
    pub(crate) fn credentials(&self) -> Result<Credentials, ConfigError> {
        fn require(value: Option<&String>, key: &'static str) -> Result<String, ConfigError> {
            value
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or(ConfigError::MissingCredential(key))
        }

        Ok(Credentials {
            application_key: require(self.application_key.as_ref(), "application_key")?,
            application_secret: require(self.application_secret.as_ref(), "application_secret")?,
            consumer_key: require(self.consumer_key.as_ref(), "consumer_key")?,
        })
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load OVH client configuration: {0}")]
    Extract(Box<figment::Error>),
    #[error("Missing OVH credential `{0}`")]
    MissingCredential(&'static str),
    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Known api endpoints, addressed by the same aliases the OVH SDKs use.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum NamedEndpoint {
    OvhEu,
    OvhCa,
    OvhUs,
    KimsufiEu,
    KimsufiCa,
    SoyoustartEu,
    SoyoustartCa,
}

impl NamedEndpoint {
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            NamedEndpoint::OvhEu => "https://eu.api.ovh.com/1.0",
            NamedEndpoint::OvhCa => "https://ca.api.ovh.com/1.0",
            NamedEndpoint::OvhUs => "https://api.us.ovhcloud.com/1.0",
            NamedEndpoint::KimsufiEu => "https://eu.api.kimsufi.com/1.0",
            NamedEndpoint::KimsufiCa => "https://ca.api.kimsufi.com/1.0",
            NamedEndpoint::SoyoustartEu => "https://eu.api.soyoustart.com/1.0",
            NamedEndpoint::SoyoustartCa => "https://ca.api.soyoustart.com/1.0",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OvhEndpoint {
    Named(NamedEndpoint),
    Url(Url),
}

impl Default for OvhEndpoint {
    fn default() -> Self {
        OvhEndpoint::Named(NamedEndpoint::OvhEu)
    }
}

impl OvhEndpoint {
    /// Root of the api without trailing slash, e.g. `https://eu.api.ovh.com/1.0`.
    #[must_use]
    pub fn base_url(&self) -> String {
        match self {
            OvhEndpoint::Named(named) => named.base_url().to_string(),
            OvhEndpoint::Url(url) => url.as_str().trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid OVH endpoint `{0}`. Expected a known alias such as `ovh-eu` or an absolute http(s) url")]
pub struct InvalidEndpoint(String);

impl FromStr for OvhEndpoint {
    type Err = InvalidEndpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(named) = NamedEndpoint::from_str(s) {
            return Ok(OvhEndpoint::Named(named));
        }

        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(OvhEndpoint::Url(url)),
            _ => Err(InvalidEndpoint(s.to_string())),
        }
    }
}

impl TryFrom<String> for OvhEndpoint {
    type Error = InvalidEndpoint;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OvhEndpoint> for String {
    fn from(endpoint: OvhEndpoint) -> Self {
        match endpoint {
            OvhEndpoint::Named(named) => named.to_string(),
            OvhEndpoint::Url(url) => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = DynAppConfig::from_env().unwrap();
            assert_eq!(config, DynAppConfig::default());
            assert_eq!(config.client.endpoint.base_url(), "https://eu.api.ovh.com/1.0");
            assert_eq!(config.client.request_timeout(), Duration::from_secs(180));
            assert!(!config.debug.extended_logs);
            Ok(())
        });
    }

    #[test]
    fn test_credentials_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OVH_TEST_ENDPOINT", "ovh-ca");
            jail.set_env("OVH_TEST_APPLICATION_KEY", "app_key");
            jail.set_env("OVH_TEST_APPLICATION_SECRET", "app_secret");
            jail.set_env("OVH_TEST_CONSUMER_KEY", "consumer_key");
            jail.set_env("OVH_TEST_REQUEST_TIMEOUT_SECS", "30");
            jail.set_env("OVH_TEST_DEBUG__EXTENDED_LOGS", "true");
            let config = DynAppConfig::from_env().unwrap();

            assert_eq!(
                config.client.endpoint,
                OvhEndpoint::Named(NamedEndpoint::OvhCa)
            );
            assert_eq!(config.client.request_timeout(), Duration::from_secs(30));
            assert!(config.debug.extended_logs);

            let credentials = config.client.credentials().unwrap();
            assert_eq!(credentials.application_key, "app_key");
            assert_eq!(credentials.application_secret, "app_secret");
            assert_eq!(credentials.consumer_key, "consumer_key");
            Ok(())
        });
    }

    #[test]
    fn test_custom_endpoint_url() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OVH_TEST_ENDPOINT", "http://localhost:8080/1.0/");
            let config = DynAppConfig::from_env().unwrap();
            assert_eq!(config.client.endpoint.base_url(), "http://localhost:8080/1.0");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OVH_TEST_ENDPOINT", "ovh-mars");
            let err = DynAppConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("ovh-mars"), "{err}");
            Ok(())
        });
    }

    #[test]
    fn test_missing_credential() {
        let config = ClientConfig {
            application_key: Some("app_key".to_string()),
            application_secret: Some(String::new()),
            consumer_key: Some("consumer_key".to_string()),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.credentials(),
            Err(ConfigError::MissingCredential("application_secret"))
        ));
    }

    #[test]
    fn test_secrets_are_redacted() {
        let config = ClientConfig {
            application_key: Some("app_key".to_string()),
            application_secret: Some("very-secret".to_string()),
            consumer_key: Some("consumer-secret".to_string()),
            ..ClientConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("app_key"));
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("consumer-secret"));
    }

    #[test]
    fn test_named_endpoints_round_trip_through_their_alias() {
        for named in NamedEndpoint::iter() {
            let alias = named.to_string();
            assert_eq!(alias.parse::<OvhEndpoint>().unwrap(), OvhEndpoint::Named(named));
            assert!(named.base_url().starts_with("https://"));
        }
        assert_eq!(NamedEndpoint::SoyoustartEu.to_string(), "soyoustart-eu");
    }
}
