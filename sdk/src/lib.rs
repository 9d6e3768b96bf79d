//! The Range SDK - Rust client library for The Range supplier API.
//!
//! Suppliers use the API to pull orders, acknowledge them, report despatch
//! and cancellation, publish stock levels, and submit product and price feeds.
//!
//! # Modules
//!
//! - [`client`]: Session login, request dispatch and the [`TheRangeManager`] façade
//! - [`resources`]: One client per endpoint
//! - [`types`]: Validated request types
//! - [`error`]: The [`SdkError`] type
//!
//! All calls are blocking. Clients created from one manager share a single
//! session, so logging in once authorizes all of them.
//!
//! # Example
//!
//! ```rust
//! use therange_sdk::{CancelCode, CancelOrderRequest, OrderItem, StockItem};
//!
//! let stock = StockItem::new("SKU-1", 0).unwrap();
//! assert_eq!(stock.qty, 0);
//!
//! let cancel = CancelOrderRequest::new(
//!     "ORDER1",
//!     vec![OrderItem::new("SKU-1", 1).unwrap()],
//!     CancelCode::StockNotAvailable,
//! )
//! .unwrap();
//! assert_eq!(cancel.to_payload().unwrap()["cancel_reason"], "");
//! ```

pub mod client;
pub mod error;
pub mod resources;
pub mod types;
pub mod validate;

pub use client::{AuthClient, Config, Credentials, TheRangeManager};
pub use error::SdkError;
pub use resources::{
    OrderAckClient, OrderEventClient, OrderFeedClient, ProductFeedClient, StockAvailabilityClient,
};
pub use types::{
    CancelCode, CancelOrderRequest, DeliveryService, DispatchOrderBuilder, DispatchOrderRequest,
    OrderAckRequest, OrderFeedRequest, OrderFeedType, OrderItem, PriceAmendmentEntry,
    PriceAmendmentRequest, PriceEntry, ProductAttribute, ProductEntry, ProductFeedRequest,
    StockItem,
};
