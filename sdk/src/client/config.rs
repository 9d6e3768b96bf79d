//! Client configuration.
//!
//! Provides environment selection (production, UAT, custom) and HTTP options.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::SdkError;

/// Production API base URL.
pub const PRODUCTION_BASE_URL: &str = "https://supplier.rstore.com/rest/";

/// UAT (test) API base URL.
pub const UAT_BASE_URL: &str = "https://uatsupplier.rstore.com/rest/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable selecting `production` or `uat`.
pub const ENV_ENVIRONMENT: &str = "THERANGE_ENV";

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "THERANGE_BASE_URL";

/// Environment variable holding the API username.
pub const ENV_USERNAME: &str = "THERANGE_USERNAME";

/// Environment variable holding the API password.
pub const ENV_PASSWORD: &str = "THERANGE_PASSWORD";

/// A named API host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    base_url: String,
    name: String,
}

impl EnvironmentConfig {
    /// Creates an environment; the base URL is normalized to end with one `/`.
    #[must_use]
    pub fn new(base_url: &str, name: impl Into<String>) -> Self {
        Self {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            name: name.into(),
        }
    }

    /// The production environment.
    #[must_use]
    pub fn production() -> Self {
        Self::new(PRODUCTION_BASE_URL, "production")
    }

    /// The UAT environment.
    #[must_use]
    pub fn uat() -> Self {
        Self::new(UAT_BASE_URL, "uat")
    }

    /// Returns the base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the environment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EnvironmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.base_url)
    }
}

/// SDK configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target environment.
    pub environment: EnvironmentConfig,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(EnvironmentConfig::production())
    }
}

impl Config {
    /// Creates a configuration for the given environment.
    #[must_use]
    pub fn new(environment: EnvironmentConfig) -> Self {
        Self {
            environment,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("therange-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Production configuration.
    #[must_use]
    pub fn production() -> Self {
        Self::new(EnvironmentConfig::production())
    }

    /// UAT configuration.
    #[must_use]
    pub fn uat() -> Self {
        Self::new(EnvironmentConfig::uat())
    }

    /// Configuration for a custom host.
    #[must_use]
    pub fn custom(base_url: &str, name: impl Into<String>) -> Self {
        Self::new(EnvironmentConfig::new(base_url, name))
    }

    /// UAT when `test` is set, production otherwise.
    #[must_use]
    pub fn from_test_flag(test: bool) -> Self {
        if test {
            Self::uat()
        } else {
            Self::production()
        }
    }

    /// Reads the environment from `THERANGE_BASE_URL` or `THERANGE_ENV`.
    ///
    /// A base URL takes precedence and yields a `custom` environment. Without
    /// either variable the production environment is used.
    ///
    /// # Errors
    ///
    /// Returns an error if `THERANGE_ENV` names an unknown environment.
    pub fn from_env() -> Result<Self, SdkError> {
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            return Ok(Self::custom(&base_url, "custom"));
        }
        match env::var(ENV_ENVIRONMENT).as_deref() {
            Ok("uat") => Ok(Self::uat()),
            Ok("production") | Err(_) => Ok(Self::production()),
            Ok(other) => Err(SdkError::InvalidConfig(format!(
                "{} must be 'production' or 'uat', got '{}'",
                ENV_ENVIRONMENT, other
            ))),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.environment.base_url()
    }

    /// Returns true only for the UAT environment.
    #[must_use]
    pub fn is_test_environment(&self) -> bool {
        self.environment.name() == "uat"
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or not http(s).
    pub fn validate(&self) -> Result<(), SdkError> {
        let base_url = self.base_url();
        if base_url == "/" {
            return Err(SdkError::InvalidConfig(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SdkError::InvalidConfig(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        url::Url::parse(base_url)
            .map_err(|e| SdkError::InvalidConfig(format!("base_url is not a valid URL: {}", e)))?;

        Ok(())
    }
}

/// API login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username.
    pub username: String,

    /// Password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads `THERANGE_USERNAME` and `THERANGE_PASSWORD`.
    ///
    /// Returns `None` unless both are set and non-empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let username = env::var(ENV_USERNAME).ok().filter(|s| !s.is_empty())?;
        let password = env::var(ENV_PASSWORD).ok().filter(|s| !s.is_empty())?;
        Some(Self::new(username, password))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_normalizes_trailing_slash() {
        for url in [
            "https://api.example.com/rest",
            "https://api.example.com/rest/",
            "https://api.example.com/rest///",
        ] {
            let env = EnvironmentConfig::new(url, "");
            assert_eq!(env.base_url(), "https://api.example.com/rest/");
            assert_eq!(env.name(), "");
        }
    }

    #[test]
    fn test_environment_display() {
        let env = EnvironmentConfig::new("https://api.example.com/rest", "staging");
        assert_eq!(env.to_string(), "staging (https://api.example.com/rest/)");
    }

    #[test]
    fn test_config_default_is_production() {
        let config = Config::default();
        assert_eq!(config.base_url(), PRODUCTION_BASE_URL);
        assert_eq!(config.environment.name(), "production");
        assert!(!config.is_test_environment());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_config_uat() {
        let config = Config::uat();
        assert_eq!(config.base_url(), UAT_BASE_URL);
        assert!(config.is_test_environment());
        assert_eq!(Config::from_test_flag(true), config);
        assert_eq!(Config::from_test_flag(false), Config::production());
    }

    #[test]
    fn test_config_custom() {
        let config = Config::custom("https://custom.api.com/v1/rest", "custom");
        assert_eq!(config.base_url(), "https://custom.api.com/v1/rest/");
        assert_eq!(config.environment.name(), "custom");
        assert!(!config.is_test_environment());
    }

    #[test]
    fn test_config_builder() {
        let config = Config::uat()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("my-app/1.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "my-app/1.0");
    }

    #[test]
    fn test_config_validate() {
        assert!(Config::production().validate().is_ok());
        assert!(Config::custom("", "empty").validate().is_err());
        assert!(Config::custom("ftp://api.example.com", "ftp")
            .validate()
            .is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("user", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }
}
