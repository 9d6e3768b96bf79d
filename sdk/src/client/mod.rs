//! HTTP layer for the supplier API.
//!
//! [`AuthClient`] logs in and holds the session, [`BaseClient`] dispatches
//! requests with it, and [`TheRangeManager`] wires both to the resource
//! clients.
//!
//! # Example
//!
//! ```rust,no_run
//! use therange_sdk::client::TheRangeManager;
//!
//! fn main() -> Result<(), therange_sdk::SdkError> {
//!     let manager = TheRangeManager::new("username", "password", true)?;
//!     manager.authenticate()?;
//!
//!     let orders = manager.order_feed().get_orders(&Default::default())?;
//!     println!("{}", orders);
//!
//!     manager.order_ack().acknowledge_orders(["ORDER123"])?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod http;
pub mod manager;

pub use auth::{AuthClient, SupplierId};
pub use config::{Config, Credentials, EnvironmentConfig};
pub use http::{BaseClient, DispatchOptions};
pub use manager::TheRangeManager;
