//! Product catalogue and price submissions.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::client::{AuthClient, BaseClient, DispatchOptions};
use crate::error::SdkError;
use crate::types::product::legacy_title_guard;
use crate::types::{PriceAmendmentRequest, ProductFeedRequest};

/// Client for `product_feed.api`.
///
/// Products and price amendments share the endpoint. The session `mode` is
/// never attached.
#[derive(Debug, Clone)]
pub struct ProductFeedClient {
    base: BaseClient,
}

impl ProductFeedClient {
    /// Endpoint path.
    pub const ENDPOINT: &'static str = "product_feed.api";

    /// Creates a client over a shared session.
    #[must_use]
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self {
            base: BaseClient::new(auth),
        }
    }

    /// Submits loose product mappings with only the title length checked.
    ///
    /// No login check is made and an empty list is sent as is.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `products` is not a list or a title is
    /// longer than 80 characters.
    pub fn submit_products_legacy(&self, products: Value) -> Result<Value, SdkError> {
        legacy_title_guard(&products)?;
        self.base.post(
            Self::ENDPOINT,
            json!({ "product_arr": products }),
            DispatchOptions::without_mode(),
        )
    }

    /// Submits fully validated products.
    ///
    /// # Errors
    ///
    /// Returns a validation error before login or for any invalid product, and
    /// a dispatch error if the request fails.
    pub fn send_product_feed(&self, request: &ProductFeedRequest) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        request.validate()?;
        self.send_products(request)
    }

    /// Submits a loose list of product mappings after full validation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `product_data` is not a non-empty list of
    /// valid products.
    pub fn send_product_feed_value(&self, product_data: Value) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        let request = ProductFeedRequest::from_value(product_data)?;
        self.send_products(&request)
    }

    /// Submits validated price amendments.
    ///
    /// # Errors
    ///
    /// Returns a validation error before login or for any invalid amendment,
    /// and a dispatch error if the request fails.
    pub fn send_price_amendment(&self, request: &PriceAmendmentRequest) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        request.validate()?;
        self.send_prices(request)
    }

    /// Submits a loose list of price amendment mappings after validation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `price_data` is not a non-empty list of
    /// valid amendments.
    pub fn send_price_amendment_value(&self, price_data: Value) -> Result<Value, SdkError> {
        self.base.ensure_authenticated()?;
        let request = PriceAmendmentRequest::from_value(price_data)?;
        self.send_prices(&request)
    }

    fn send_products(&self, request: &ProductFeedRequest) -> Result<Value, SdkError> {
        debug!(products = request.product_arr.len(), "sending product feed");
        self.base.post(
            Self::ENDPOINT,
            request.to_payload()?,
            DispatchOptions::without_mode(),
        )
    }

    fn send_prices(&self, request: &PriceAmendmentRequest) -> Result<Value, SdkError> {
        debug!(products = request.product_arr.len(), "sending price amendment");
        self.base.post(
            Self::ENDPOINT,
            request.to_payload()?,
            DispatchOptions::without_mode(),
        )
    }
}
