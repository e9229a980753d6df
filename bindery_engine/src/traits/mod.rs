//! Interface contracts for the engine's storage backends.
//!
//! The module defines the behavior a database backend needs to expose in order to be driven by the engine APIs:
//!
//! * [`CatalogStore`] persists and queries the reconciled product catalog.
//! * [`OrderStore`] persists and queries orders from every source.
//! * [`AnalyticsStore`] holds the monthly sales and royalty aggregates.
//!
//! The public APIs ([`crate::SyncApi`], [`crate::AnalyticsApi`]) are generic over these traits, so they stay
//! agnostic of the underlying database.
use thiserror::Error;

mod analytics;
mod catalog;
mod orders;

pub use analytics::AnalyticsStore;
pub use catalog::CatalogStore;
pub use orders::OrderStore;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}
