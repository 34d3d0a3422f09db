use serde::Deserialize;

use crate::error::{Error, Result};
use crate::utils::constants::{DEFAULT_API_BASE_URI, DEFAULT_TOKEN_ENDPOINT};

/// ================================
/// Client configuration
/// ================================
///
/// Credential settings for the authorization endpoint plus the endpoints
/// and logging used by the client. Required settings are checked by
/// [`Configuration::validate`] rather than at construction, so a
/// configuration can be assembled piecemeal through the setters.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    client_id: Option<String>,
    redirect_uri: Option<String>,
    default_authorization_code: Option<String>,
    token_endpoint: Option<String>,
    api_base_uri: Option<String>,
    logging: Option<LoggingConfig>,
}

/// A named credential setting and whether validation demands it.
pub struct Setting {
    pub name: &'static str,
    pub required: bool,
    read: fn(&Configuration) -> Option<&str>,
}

impl Setting {
    pub fn is_set(&self, configuration: &Configuration) -> bool {
        (self.read)(configuration).is_some()
    }
}

/// Every credential setting, in reporting order.
pub const SETTINGS: &[Setting] = &[
    Setting {
        name: "client_id",
        required: true,
        read: read_client_id,
    },
    Setting {
        name: "redirect_uri",
        required: true,
        read: read_redirect_uri,
    },
    Setting {
        name: "default_authorization_code",
        required: false,
        read: read_default_authorization_code,
    },
];

fn read_client_id(c: &Configuration) -> Option<&str> {
    c.client_id.as_deref()
}

fn read_redirect_uri(c: &Configuration) -> Option<&str> {
    c.redirect_uri.as_deref()
}

fn read_default_authorization_code(c: &Configuration) -> Option<&str> {
    c.default_authorization_code.as_deref()
}

impl Configuration {
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            redirect_uri: Some(redirect_uri.into()),
            ..Self::default()
        }
    }

    /// Fails once, naming every required setting that is still unset.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<String> = SETTINGS
            .iter()
            .filter(|setting| setting.required && !setting.is_set(self))
            .map(|setting| setting.name.to_owned())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingSetting(missing))
        }
    }

    pub fn client_id(&self) -> Result<&str> {
        required(self.client_id.as_deref(), "client_id")
    }

    pub fn redirect_uri(&self) -> Result<&str> {
        required(self.redirect_uri.as_deref(), "redirect_uri")
    }

    pub fn default_authorization_code(&self) -> Option<&str> {
        self.default_authorization_code.as_deref()
    }

    pub fn token_endpoint(&self) -> &str {
        self.token_endpoint.as_deref().unwrap_or(DEFAULT_TOKEN_ENDPOINT)
    }

    pub fn api_base_uri(&self) -> &str {
        self.api_base_uri.as_deref().unwrap_or(DEFAULT_API_BASE_URI)
    }

    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    pub fn set_client_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.client_id = Some(value.into());
        self
    }

    pub fn set_redirect_uri(&mut self, value: impl Into<String>) -> &mut Self {
        self.redirect_uri = Some(value.into());
        self
    }

    pub fn set_default_authorization_code(&mut self, value: impl Into<String>) -> &mut Self {
        self.default_authorization_code = Some(value.into());
        self
    }

    pub fn set_token_endpoint(&mut self, value: impl Into<String>) -> &mut Self {
        self.token_endpoint = Some(value.into());
        self
    }

    pub fn set_api_base_uri(&mut self, value: impl Into<String>) -> &mut Self {
        self.api_base_uri = Some(value.into());
        self
    }

    pub fn set_logging(&mut self, logging: LoggingConfig) -> &mut Self {
        self.logging = Some(logging);
        self
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    value.ok_or_else(|| Error::MissingSetting(vec![name.to_owned()]))
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_reports_all_missing_required_settings() {
        let err = Configuration::default().validate().unwrap_err();
        match err {
            Error::MissingSetting(names) => assert_eq!(names, vec!["client_id", "redirect_uri"]),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn validate_reports_only_the_missing_setting() {
        let mut configuration = Configuration::default();
        configuration.set_redirect_uri("example.com");
        assert_eq!(
            configuration.validate().unwrap_err().to_string(),
            "undefined settings: client_id"
        );
    }

    #[test]
    fn validate_ignores_optional_settings() {
        let configuration = Configuration::new("123", "example.com");
        assert!(configuration.validate().is_ok());
        assert_eq!(configuration.default_authorization_code(), None);
    }

    #[test]
    fn required_getter_fails_when_unset() {
        let configuration = Configuration::default();
        assert!(matches!(
            configuration.client_id(),
            Err(Error::MissingSetting(names)) if names == vec!["client_id"]
        ));
    }

    #[test]
    fn setters_round_trip() {
        let mut configuration = Configuration::default();
        configuration
            .set_client_id("CollardBlaster")
            .set_redirect_uri("zoo.net")
            .set_default_authorization_code("5678");
        assert_eq!(configuration.client_id().unwrap(), "CollardBlaster");
        assert_eq!(configuration.redirect_uri().unwrap(), "zoo.net");
        assert_eq!(configuration.default_authorization_code(), Some("5678"));
    }

    #[test]
    fn endpoints_fall_back_to_defaults() {
        let configuration = Configuration::new("1", "zoo.net");
        assert_eq!(configuration.token_endpoint(), DEFAULT_TOKEN_ENDPOINT);
        assert_eq!(configuration.api_base_uri(), DEFAULT_API_BASE_URI);
        assert_eq!(configuration.logging(), LoggingConfig::default());
    }
}
