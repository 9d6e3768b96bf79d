//! Dispatch and cancellation events.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::client::{AuthClient, BaseClient, DispatchOptions};
use crate::error::SdkError;
use crate::types::{CancelOrderRequest, DispatchOrderRequest};

const DISPATCH_CONTEXT: &str = "Invalid dispatch request";
const CANCEL_CONTEXT: &str = "Invalid cancel request";

/// Client for `order_event.api`.
#[derive(Debug, Clone)]
pub struct OrderEventClient {
    base: BaseClient,
}

impl OrderEventClient {
    /// Endpoint path.
    pub const ENDPOINT: &'static str = "order_event.api";

    /// Creates a client over a shared session.
    #[must_use]
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self {
            base: BaseClient::new(auth),
        }
    }

    /// Reports that order items have been despatched.
    ///
    /// # Errors
    ///
    /// Returns a validation error before login or for an invalid request, and
    /// a dispatch error if the request fails.
    pub fn dispatch_order(&self, request: &DispatchOrderRequest) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        request
            .validate()
            .map_err(|e| e.with_context(DISPATCH_CONTEXT))?;
        debug!(order_number = %request.order_number, "sending dispatch event");
        self.base.post(
            Self::ENDPOINT,
            request.to_payload()?,
            DispatchOptions::default(),
        )
    }

    /// Reports a despatch described by a loose mapping.
    ///
    /// Items may be given as `items` or `item_arr`.
    ///
    /// # Errors
    ///
    /// See [`OrderEventClient::dispatch_order`].
    pub fn dispatch_order_value(&self, data: Value) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        let request =
            DispatchOrderRequest::from_value(data).map_err(|e| e.with_context(DISPATCH_CONTEXT))?;
        debug!(order_number = %request.order_number, "sending dispatch event");
        self.base.post(
            Self::ENDPOINT,
            request.to_payload()?,
            DispatchOptions::default(),
        )
    }

    /// Cancels order items.
    ///
    /// # Errors
    ///
    /// Returns a validation error before login or for an invalid request, and
    /// a dispatch error if the request fails.
    pub fn cancel_order(&self, request: &CancelOrderRequest) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        request
            .validate()
            .map_err(|e| e.with_context(CANCEL_CONTEXT))?;
        debug!(
            order_number = %request.order_number,
            code = %request.cancel_code,
            "sending cancel event"
        );
        self.base.post(
            Self::ENDPOINT,
            request.to_payload()?,
            DispatchOptions::default(),
        )
    }

    /// Cancels order items described by a loose mapping.
    ///
    /// # Errors
    ///
    /// See [`OrderEventClient::cancel_order`].
    pub fn cancel_order_value(&self, data: Value) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        let request =
            CancelOrderRequest::from_value(data).map_err(|e| e.with_context(CANCEL_CONTEXT))?;
        debug!(
            order_number = %request.order_number,
            code = %request.cancel_code,
            "sending cancel event"
        );
        self.base.post(
            Self::ENDPOINT,
            request.to_payload()?,
            DispatchOptions::default(),
        )
    }

    /// Sends an arbitrary event payload as-is.
    ///
    /// Neither the session nor the payload is checked. Before login the
    /// request goes out without a `supplier_id`, a `mode` or the `ksi`
    /// cookie, and the server is left to reject it.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Authorization`] if the server answers 401 and a
    /// dispatch error for any other failure.
    pub fn send_event(&self, event: Value) -> Result<Value, SdkError> {
        self.base
            .post(Self::ENDPOINT, event, DispatchOptions::default())
    }
}
