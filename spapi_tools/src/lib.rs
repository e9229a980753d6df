//! A thin client for the Amazon Selling Partner API, covering the order, catalog and pricing endpoints that the
//! aggregation pipeline consumes. Authentication is handled internally by exchanging a long-lived LWA refresh
//! token for short-lived access tokens as needed.
mod api;
mod config;
mod data_objects;
mod error;

pub use api::SpApi;
pub use config::SpApiConfig;
pub use data_objects::{MoneyField, SpCatalogItem, SpItemSummary, SpOrder, SpOrderItem};
pub use error::SpApiError;
