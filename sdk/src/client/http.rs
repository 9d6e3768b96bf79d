//! Request dispatcher.
//!
//! [`BaseClient`] sends a JSON payload to an endpoint with the session cookie,
//! the `supplier_id` query parameter and the session `mode`, and maps the
//! response status to [`SdkError`].

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use super::auth::AuthClient;
use crate::error::SdkError;

/// Message returned when a resource call is made before login.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Must be authenticated before making this call";

/// Controls which session attributes are attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Append `?supplier_id=<id>` when the session has one.
    pub include_supplier_id: bool,
    /// Add `"mode"` to object payloads when the session has one.
    pub include_mode: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            include_supplier_id: true,
            include_mode: true,
        }
    }
}

impl DispatchOptions {
    /// Supplier id only; the payload is sent unchanged.
    #[must_use]
    pub const fn without_mode() -> Self {
        Self {
            include_supplier_id: true,
            include_mode: false,
        }
    }
}

/// Shared dispatcher used by every resource client.
#[derive(Debug, Clone)]
pub struct BaseClient {
    auth: Arc<AuthClient>,
}

impl BaseClient {
    /// Creates a dispatcher over a shared session.
    #[must_use]
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self { auth }
    }

    /// Returns the shared session.
    #[must_use]
    pub fn auth(&self) -> &Arc<AuthClient> {
        &self.auth
    }

    /// Fails unless the shared session is authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Validation`] before login.
    pub fn ensure_authenticated(&self) -> Result<(), SdkError> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(SdkError::Validation(NOT_AUTHENTICATED_MESSAGE.to_string()))
        }
    }

    /// POSTs `payload` to `endpoint` and returns the decoded JSON response.
    ///
    /// # Errors
    ///
    /// - [`SdkError::Authorization`] on HTTP 401.
    /// - [`SdkError::Validation`] on HTTP 400, carrying the response text.
    /// - [`SdkError::Transport`] on any other non-2xx status, network failure
    ///   or undecodable body.
    pub fn post(
        &self,
        endpoint: &str,
        payload: Value,
        options: DispatchOptions,
    ) -> Result<Value, SdkError> {
        let mut url = self.auth.endpoint_url(endpoint)?;

        let supplier_id = if options.include_supplier_id {
            self.auth.supplier_id().filter(|id| !id.is_empty())
        } else {
            None
        };
        if let Some(id) = &supplier_id {
            url.query_pairs_mut().append_pair("supplier_id", id);
        }

        let mode = if options.include_mode {
            self.auth.mode_value()
        } else {
            None
        };
        let body = build_payload(payload, mode);

        debug!(
            endpoint,
            supplier_id = supplier_id.as_deref(),
            with_mode = body.get("mode").is_some(),
            "dispatching request"
        );

        let response = self.auth.http().post(url).json(&body).send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SdkError::Authorization("Not authenticated.".to_string()));
        }
        if status == StatusCode::BAD_REQUEST {
            let text = response.text().unwrap_or_default();
            return Err(SdkError::Validation(format!("Bad request: {}", text)));
        }

        let response = response.error_for_status()?;
        debug!(endpoint, status = status.as_u16(), "request succeeded");
        Ok(response.json::<Value>()?)
    }
}

/// Adds `"mode"` to an object payload; non-objects and falsy modes pass through.
///
/// The mode keeps its JSON type, so a numeric mode is sent as a number.
#[must_use]
pub fn build_payload(payload: Value, mode: Option<Value>) -> Value {
    match (payload, mode) {
        (Value::Object(mut map), Some(mode)) if is_truthy(&mode) => {
            map.insert("mode".to_string(), mode);
            Value::Object(map)
        }
        (payload, _) => payload,
    }
}

/// Returns false for `null`, `false`, zero, and empty strings, lists or maps.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
