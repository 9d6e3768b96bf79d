//! Stock level updates.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::client::{AuthClient, BaseClient, DispatchOptions};
use crate::error::SdkError;
use crate::types::stock::{stock_items_from_value, stock_payload};
use crate::types::StockItem;

/// Client for `stock_availability.api`.
///
/// The payload is a bare list, so the session `mode` is never attached.
#[derive(Debug, Clone)]
pub struct StockAvailabilityClient {
    base: BaseClient,
}

impl StockAvailabilityClient {
    /// Endpoint path.
    pub const ENDPOINT: &'static str = "stock_availability.api";

    /// Creates a client over a shared session.
    #[must_use]
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self {
            base: BaseClient::new(auth),
        }
    }

    /// Publishes stock levels.
    ///
    /// # Errors
    ///
    /// Returns a validation error before login, for an empty list or for any
    /// invalid item, and a dispatch error if the request fails.
    pub fn update_stock(&self, items: &[StockItem]) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        let payload = stock_payload(items)?;
        debug!(items = items.len(), "updating stock");
        self.base
            .post(Self::ENDPOINT, payload, DispatchOptions::without_mode())
    }

    /// Publishes stock levels from a loose list of `{code, qty}` mappings.
    ///
    /// # Errors
    ///
    /// See [`StockAvailabilityClient::update_stock`].
    pub fn update_stock_value(&self, stock_data: Value) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        let items = stock_items_from_value(stock_data)?;
        let payload = stock_payload(&items)?;
        debug!(items = items.len(), "updating stock");
        self.base
            .post(Self::ENDPOINT, payload, DispatchOptions::without_mode())
    }
}
