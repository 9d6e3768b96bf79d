//! Order acknowledgement.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{AuthClient, BaseClient, DispatchOptions};
use crate::error::SdkError;
use crate::types::OrderAckRequest;

const CONTEXT: &str = "Invalid order_numbers";

/// Client for `order_ack.api`.
#[derive(Debug, Clone)]
pub struct OrderAckClient {
    base: BaseClient,
}

impl OrderAckClient {
    /// Endpoint path.
    pub const ENDPOINT: &'static str = "order_ack.api";

    /// Creates a client over a shared session.
    #[must_use]
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self {
            base: BaseClient::new(auth),
        }
    }

    /// Acknowledges receipt of the given orders.
    ///
    /// # Errors
    ///
    /// Returns a validation error before login or for an empty list or blank
    /// IDs, and a dispatch error if the request fails.
    pub fn acknowledge_orders<I, S>(&self, order_numbers: I) -> Result<Value, SdkError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base.ensure_authenticated()?;
        let request = OrderAckRequest::new(order_numbers).map_err(|e| e.with_context(CONTEXT))?;
        self.send(&request)
    }

    /// Sends a prepared acknowledgement.
    ///
    /// # Errors
    ///
    /// See [`OrderAckClient::acknowledge_orders`].
    pub fn acknowledge(&self, request: &OrderAckRequest) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        request.validate().map_err(|e| e.with_context(CONTEXT))?;
        self.send(request)
    }

    /// Acknowledges a loose JSON list of order numbers.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `order_numbers` is not a list of
    /// non-blank strings.
    pub fn acknowledge_orders_value(&self, order_numbers: Value) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        let request =
            OrderAckRequest::from_value(order_numbers).map_err(|e| e.with_context(CONTEXT))?;
        self.send(&request)
    }

    fn send(&self, request: &OrderAckRequest) -> Result<Value, SdkError> {
        self.base.post(
            Self::ENDPOINT,
            request.to_payload(),
            DispatchOptions::default(),
        )
    }
}
