//! Single entry point bundling the session and every resource client.

use std::sync::Arc;

use serde_json::Value;

use super::auth::AuthClient;
use super::config::{Config, Credentials};
use crate::error::SdkError;
use crate::resources::{
    OrderAckClient, OrderEventClient, OrderFeedClient, ProductFeedClient,
    StockAvailabilityClient,
};

/// Owns one shared session and a client per endpoint.
#[derive(Debug, Clone)]
pub struct TheRangeManager {
    auth: Arc<AuthClient>,
    order_feed: OrderFeedClient,
    order_ack: OrderAckClient,
    order_event: OrderEventClient,
    stock_availability: StockAvailabilityClient,
    product_feed: ProductFeedClient,
}

impl TheRangeManager {
    /// Creates a manager for production, or UAT when `test` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        test: bool,
    ) -> Result<Self, SdkError> {
        Self::with_config(
            Credentials::new(username, password),
            Config::from_test_flag(test),
        )
    }

    /// Creates a manager with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn with_config(credentials: Credentials, config: Config) -> Result<Self, SdkError> {
        let auth = Arc::new(AuthClient::new(credentials, config)?);
        Ok(Self {
            order_feed: OrderFeedClient::new(Arc::clone(&auth)),
            order_ack: OrderAckClient::new(Arc::clone(&auth)),
            order_event: OrderEventClient::new(Arc::clone(&auth)),
            stock_availability: StockAvailabilityClient::new(Arc::clone(&auth)),
            product_feed: ProductFeedClient::new(Arc::clone(&auth)),
            auth,
        })
    }

    /// Logs in; every resource client sees the new session.
    ///
    /// # Errors
    ///
    /// See [`AuthClient::authenticate`].
    pub fn authenticate(&self) -> Result<Value, SdkError> {
        self.auth.authenticate()
    }

    /// Returns the shared session.
    #[must_use]
    pub fn auth(&self) -> &Arc<AuthClient> {
        &self.auth
    }

    /// Order feed client.
    #[must_use]
    pub fn order_feed(&self) -> &OrderFeedClient {
        &self.order_feed
    }

    /// Order acknowledgement client.
    #[must_use]
    pub fn order_ack(&self) -> &OrderAckClient {
        &self.order_ack
    }

    /// Dispatch and cancellation client.
    #[must_use]
    pub fn order_event(&self) -> &OrderEventClient {
        &self.order_event
    }

    /// Stock update client.
    #[must_use]
    pub fn stock_availability(&self) -> &StockAvailabilityClient {
        &self.stock_availability
    }

    /// Product and price feed client.
    #[must_use]
    pub fn product_feed(&self) -> &ProductFeedClient {
        &self.product_feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_test_flag_selects_uat() {
        let manager = TheRangeManager::new("user", "pass", true).expect("manager");
        assert!(manager.auth().config().is_test_environment());
        assert_eq!(
            manager.auth().base_url(),
            "https://uatsupplier.rstore.com/rest/"
        );

        let manager = TheRangeManager::new("user", "pass", false).expect("manager");
        assert!(!manager.auth().config().is_test_environment());
    }

    #[test]
    fn test_manager_clients_share_session() {
        let manager = TheRangeManager::new("user", "pass", true).expect("manager");
        assert_eq!(Arc::strong_count(manager.auth()), 6);
        assert!(!manager.auth().is_authenticated());
    }

    #[test]
    fn test_manager_rejects_calls_before_login() {
        let manager = TheRangeManager::new("user", "pass", true).expect("manager");
        let err = manager
            .order_ack()
            .acknowledge_orders(["ORDER1"])
            .expect_err("unauthenticated");
        assert!(err.is_validation());
    }
}
