//! # packrat-client
//!
//! Client for the Packrat inventory API: a transport boundary (trait plus
//! reqwest-backed implementation) and the [`ItemService`] that drives item
//! persistence, checkout workflows, and client-side hierarchy queries.

pub mod item;
pub mod transport;

pub use item::inventory::Inventory;
pub use item::service::ItemService;
pub use transport::{Method, RequestBody, Transport};
pub use transport::http::HttpTransport;
