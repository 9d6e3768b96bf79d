//! Session authentication.
//!
//! [`AuthClient`] owns the credentials, the pooled HTTP client with its cookie
//! jar, and the session attributes returned at login. Resource clients share
//! one instance through an [`Arc`], so a login through any handle is visible
//! to all of them.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use reqwest::{StatusCode, Url};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::config::{Config, Credentials};
use super::http::is_truthy;
use crate::error::SdkError;

/// Login endpoint, relative to the base URL.
pub const LOGIN_ENDPOINT: &str = "authenticate.api";

/// Name of the session cookie issued at login.
pub const SESSION_COOKIE: &str = "ksi";

/// Wire form sent when the server did not assign a supplier id.
pub const MISSING_SUPPLIER_ID: &str = "None";

/// Supplier identity returned at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplierId {
    /// The server returned an id; numbers are kept in their string form.
    Assigned(String),
    /// The login response carried no id (null or absent).
    Missing,
}

impl SupplierId {
    /// Reads the `supplier_id` field of a login response.
    #[must_use]
    pub fn from_login_field(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::String(s)) => Self::Assigned(s.clone()),
            Some(other) => Self::Assigned(other.to_string()),
        }
    }

    /// Returns the value sent as the `supplier_id` query parameter.
    ///
    /// [`SupplierId::Missing`] serializes as `"None"`, which the server expects.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Assigned(id) => id,
            Self::Missing => MISSING_SUPPLIER_ID,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SessionState {
    mode: Option<Value>,
    supplier_id: Option<SupplierId>,
    session_token: Option<String>,
}

/// Authenticated session shared by every resource client.
#[derive(Debug)]
pub struct AuthClient {
    credentials: Credentials,
    config: Config,
    base_url: Url,
    http: Client,
    jar: Arc<Jar>,
    state: RwLock<SessionState>,
}

impl AuthClient {
    /// Creates an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(credentials: Credentials, config: Config) -> Result<Self, SdkError> {
        config.validate()?;
        let base_url = Url::parse(config.base_url())
            .map_err(|e| SdkError::InvalidConfig(format!("base_url is not a valid URL: {}", e)))?;

        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self {
            credentials,
            config,
            base_url,
            http,
            jar,
            state: RwLock::new(SessionState::default()),
        })
    }

    /// Logs in and stores the session attributes, replacing any earlier session.
    ///
    /// The `ksi` token is stored in the cookie jar under the base URL, so it
    /// is replayed on every endpoint whatever `Domain` or `Path` the server
    /// scoped it to. Returns the login response body.
    ///
    /// # Errors
    ///
    /// - [`SdkError::Authorization`] on HTTP 401.
    /// - [`SdkError::Validation`] on HTTP 400, carrying the response text.
    /// - [`SdkError::Protocol`] if the response lacks the `ksi` cookie or is not JSON.
    /// - [`SdkError::Transport`] for any other failure.
    pub fn authenticate(&self) -> Result<Value, SdkError> {
        let url = self.endpoint_url(LOGIN_ENDPOINT)?;
        debug!(%url, username = %self.credentials.username, "authenticating");

        let response = self
            .http
            .post(url)
            .json(&json!({
                "user": self.credentials.username,
                "pass": self.credentials.password,
            }))
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SdkError::Authorization(
                "Unauthorized: Invalid credentials".to_string(),
            ));
        }
        if status == StatusCode::BAD_REQUEST {
            let body = response.text().unwrap_or_default();
            return Err(SdkError::Validation(format!("Bad request: {}", body)));
        }
        let response = response.error_for_status()?;

        let token = response
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| {
                SdkError::Protocol(format!(
                    "Authentication failed: '{}' cookie missing",
                    SESSION_COOKIE
                ))
            })?;

        let body = response.text()?;
        let data: Value = serde_json::from_str(&body)
            .map_err(|e| SdkError::Protocol(format!("login response is not valid JSON: {}", e)))?;

        self.jar
            .add_cookie_str(&format!("{}={}", SESSION_COOKIE, token), &self.base_url);

        let mode = data.get("mode").filter(|m| is_truthy(m)).cloned();
        let supplier_id = SupplierId::from_login_field(data.get("supplier_id"));
        if supplier_id == SupplierId::Missing {
            warn!(
                "login response has no supplier_id; requests will carry supplier_id={}",
                MISSING_SUPPLIER_ID
            );
        }
        info!(supplier_id = supplier_id.as_wire(), mode = ?mode, "authenticated");

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = SessionState {
            mode,
            supplier_id: Some(supplier_id),
            session_token: Some(token),
        };

        Ok(data)
    }

    /// Returns true once a login has stored a non-empty supplier id.
    ///
    /// A login that returned no supplier id still counts, since the id is
    /// then sent as `"None"`; see [`AuthClient::has_assigned_supplier_id`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_state(|s| {
            s.supplier_id
                .as_ref()
                .is_some_and(|id| !id.as_wire().is_empty())
        })
    }

    /// Returns true if the server assigned a real, non-empty supplier id.
    #[must_use]
    pub fn has_assigned_supplier_id(&self) -> bool {
        self.read_state(|s| {
            matches!(&s.supplier_id, Some(SupplierId::Assigned(id)) if !id.is_empty())
        })
    }

    /// Returns the supplier id in its wire form.
    #[must_use]
    pub fn supplier_id(&self) -> Option<String> {
        self.read_state(|s| s.supplier_id.as_ref().map(|id| id.as_wire().to_string()))
    }

    /// Returns the session mode as text.
    ///
    /// Falsy login values (`false`, `0`, `""`) are not stored.
    #[must_use]
    pub fn mode(&self) -> Option<String> {
        self.mode_value().map(|mode| match mode {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Returns the session mode exactly as the server sent it.
    #[must_use]
    pub fn mode_value(&self) -> Option<Value> {
        self.read_state(|s| s.mode.clone())
    }

    /// Returns the `ksi` session token.
    #[must_use]
    pub fn session_token(&self) -> Option<String> {
        self.read_state(|s| s.session_token.clone())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Returns the login username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url, SdkError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| SdkError::InvalidConfig(format!("invalid endpoint '{}': {}", endpoint, e)))
    }

    fn read_state<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AuthClient {
        AuthClient::new(Credentials::new("test_user", "test_pass"), Config::uat())
            .expect("client creation")
    }

    #[test]
    fn test_new_client_is_unauthenticated() {
        let auth = client();
        assert_eq!(auth.base_url(), "https://uatsupplier.rstore.com/rest/");
        assert_eq!(auth.username(), "test_user");
        assert!(!auth.is_authenticated());
        assert!(auth.mode().is_none());
        assert!(auth.mode_value().is_none());
        assert!(auth.supplier_id().is_none());
        assert!(auth.session_token().is_none());
    }

    #[test]
    fn test_new_client_invalid_config() {
        let result = AuthClient::new(Credentials::new("u", "p"), Config::custom("", "empty"));
        assert!(matches!(result, Err(SdkError::InvalidConfig(_))));
    }

    #[test]
    fn test_endpoint_url() {
        let auth = client();
        let url = auth.endpoint_url("order_ack.api").expect("url");
        assert_eq!(
            url.as_str(),
            "https://uatsupplier.rstore.com/rest/order_ack.api"
        );
    }

    #[test]
    fn test_supplier_id_coercion() {
        assert_eq!(
            SupplierId::from_login_field(Some(&json!(12345))),
            SupplierId::Assigned("12345".to_string())
        );
        assert_eq!(
            SupplierId::from_login_field(Some(&json!("67890"))),
            SupplierId::Assigned("67890".to_string())
        );
        assert_eq!(
            SupplierId::from_login_field(Some(&Value::Null)),
            SupplierId::Missing
        );
        assert_eq!(SupplierId::from_login_field(None), SupplierId::Missing);
        assert_eq!(SupplierId::Missing.as_wire(), "None");
    }
}
