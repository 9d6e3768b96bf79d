//! Order feed retrieval.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{AuthClient, BaseClient, DispatchOptions};
use crate::error::SdkError;
use crate::types::OrderFeedRequest;

const CONTEXT: &str = "Invalid parameters";

/// Client for `order_feed.api`.
#[derive(Debug, Clone)]
pub struct OrderFeedClient {
    base: BaseClient,
}

impl OrderFeedClient {
    /// Endpoint path.
    pub const ENDPOINT: &'static str = "order_feed.api";

    /// Creates a client over a shared session.
    #[must_use]
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self {
            base: BaseClient::new(auth),
        }
    }

    /// Fetches orders matching the filter.
    ///
    /// # Errors
    ///
    /// Returns a validation error before login or when the date range spans
    /// more than 35 days, and a dispatch error if the request fails.
    pub fn get_orders(&self, request: &OrderFeedRequest) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        request.validate().map_err(|e| e.with_context(CONTEXT))?;
        self.send(request)
    }

    /// Fetches orders using a loose filter mapping.
    ///
    /// Accepts `from`/`to` or `from_date`/`to_date` for the date range.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown `type` or an oversized range.
    pub fn get_orders_value(&self, params: Value) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        let request = OrderFeedRequest::from_value(params).map_err(|e| e.with_context(CONTEXT))?;
        self.send(&request)
    }

    fn send(&self, request: &OrderFeedRequest) -> Result<Value, SdkError> {
        let payload = request.to_payload()?;
        self.base
            .post(Self::ENDPOINT, payload, DispatchOptions::default())
    }
}
