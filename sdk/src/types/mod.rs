//! Request types for the marketplace API.
//!
//! Each request type validates caller input and renders the wire payload the
//! matching endpoint expects.

pub mod event;
pub mod order;
pub mod product;
pub mod stock;

pub use event::{
    CancelCode, CancelOrderRequest, DeliveryService, DispatchOrderBuilder, DispatchOrderRequest,
};
pub use order::{OrderAckRequest, OrderFeedRequest, OrderFeedType, OrderItem};
pub use product::{
    PriceAmendmentEntry, PriceAmendmentRequest, PriceEntry, ProductAttribute, ProductEntry,
    ProductFeedRequest,
};
pub use stock::StockItem;
