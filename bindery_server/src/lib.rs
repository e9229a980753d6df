//! # Bindery server
//! This module hosts the HTTP server and reconciliation pipeline for the bindery. It is responsible for:
//! * Pulling the storefront and marketplace catalogs and order streams into the local store.
//! * Recomputing the monthly sales and royalty aggregates after every pass.
//! * Serving the consolidated data over a small JSON API.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/books`: The consolidated book report (GET), and manual catalog entry (POST).
//! * `/api/kindle/orders` and `/api/kindle/analytics`: Views over the marketplace order stream, restricted to
//!   orders that touch the stored device catalog.
//! * `/api/sync`: Triggers a reconciliation pass on demand.

pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;
pub mod sync;
pub mod sync_worker;
