//! Bindery Engine
//!
//! The Bindery Engine is the storage and aggregation core of the bindery sales pipeline. It keeps a local,
//! reconciled copy of the products and orders that live on the publisher's storefront and marketplace accounts, and
//! derives the monthly sales and royalty figures from them.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). You should never need to access the database directly.
//!    Instead, use the public API provided by the engine. The exception is the data types used in the database.
//!    These are defined in the [`mod@db_types`] module and are public.
//! 2. The engine public API ([`SyncApi`] and [`AnalyticsApi`]). Backends need to implement the traits in the
//!    [`mod@traits`] module in order to act as storage for these APIs.
pub mod cross_ref;
pub mod db_types;
mod engine_api;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use engine_api::{
    analytics_api::{monthly_sales_totals, total_sales, AnalyticsApi},
    sync_api::SyncApi,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{AnalyticsStore, CatalogStore, OrderStore, StoreError};
