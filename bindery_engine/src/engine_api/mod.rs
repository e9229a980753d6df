//! # Engine public API
//!
//! The `engine_api` module exposes the programmatic API for the bindery engine. The API is modular, so that clients
//! can pick and choose the functionality they want.
//!
//! * [`sync_api`] saves and queries the product and order records that the marketplace connectors produce.
//! * [`analytics_api`] recomputes the monthly sales and royalty aggregates from the stored orders.
//!
//! # API usage
//!
//! The pattern for using the APIs is the same everywhere. An API instance is created by supplying a database
//! backend that implements the storage traits required by the API.
//!
//! ```rust,ignore
//! use bindery_engine::{SqliteDatabase, SyncApi};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! // SqliteDatabase implements CatalogStore and OrderStore
//! let api = SyncApi::new(db);
//! let products = api.all_products().await?;
//! ```

pub mod analytics_api;
pub mod sync_api;
