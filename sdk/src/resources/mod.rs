//! Resource clients, one per API endpoint.
//!
//! Every client holds a [`BaseClient`](crate::client::BaseClient) over the
//! shared session. Calls check the session first, then validate, then send.
//! [`ProductFeedClient::submit_products_legacy`] and
//! [`OrderEventClient::send_event`] skip the session check: called before
//! login they are sent without `supplier_id` or the session cookie.

pub mod order_ack;
pub mod order_event;
pub mod order_feed;
pub mod product_feed;
pub mod stock_availability;

pub use order_ack::OrderAckClient;
pub use order_event::OrderEventClient;
pub use order_feed::OrderFeedClient;
pub use product_feed::ProductFeedClient;
pub use stock_availability::StockAvailabilityClient;
