//! The reconciliation pipeline and its driver.
//!
//! [`SyncRunner`] owns the store handle and both upstream clients, and executes one full pass at a time: the
//! storefront catalog and orders, the marketplace order window, the order-derived marketplace catalog, the device
//! catalog, and finally the monthly sales and royalty recompute. Passes are single-flight: a trigger that arrives
//! while one is running is dropped with a warning rather than interleaved. Every write is a full-row upsert keyed
//! on the upstream id, so repeated passes converge on the same store state.
pub mod amazon;
pub mod kindle;
pub mod normalize;
pub mod woo;

use std::{fmt::Display, sync::Arc, time::Instant};

use bindery_engine::{
    db_types::{Order, SourceTag},
    AnalyticsApi, SqliteDatabase, StoreError, SyncApi,
};
use log::*;
use serde::{Deserialize, Serialize};
use spapi_tools::SpApi;
use thiserror::Error;
use tokio::sync::Mutex;
use woo_tools::WooApi;

use crate::{config::{ServerConfig, SyncConfig}, data_objects::KindleAnalytics, errors::ServerError};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("A reconciliation pass is already in flight")]
    PassInProgress,
    #[error("The local store failed during the pass. {0}")]
    Store(#[from] StoreError),
}

/// Per-step record counts for one completed pipeline pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    pub woo_products: usize,
    pub woo_orders: usize,
    pub amazon_orders: usize,
    pub amazon_products: usize,
    pub kindle_products: usize,
    pub months: usize,
}

impl Display for PassSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} storefront products, {} storefront orders, {} marketplace orders, {} marketplace products and {} \
             device products reconciled; {} months aggregated",
            self.woo_products, self.woo_orders, self.amazon_orders, self.amazon_products, self.kindle_products,
            self.months
        )
    }
}

#[derive(Clone)]
pub struct SyncRunner {
    db: SqliteDatabase,
    woo: WooApi,
    spapi: SpApi,
    sync_config: SyncConfig,
    royalty_rate_bps: i64,
    pass_guard: Arc<Mutex<()>>,
}

impl SyncRunner {
    pub fn new(db: SqliteDatabase, config: &ServerConfig) -> Result<Self, ServerError> {
        let woo = WooApi::new(config.woo_config.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
        let spapi = SpApi::new(config.spapi_config.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
        Ok(Self {
            db,
            woo,
            spapi,
            sync_config: config.sync.clone(),
            royalty_rate_bps: config.royalty_rate_bps,
            pass_guard: Arc::new(Mutex::new(())),
        })
    }

    /// Runs one full pipeline pass, unless one is already in flight, in which case this trigger is dropped.
    ///
    /// Upstream failures degrade to partial data and never surface here; only a failing local store does.
    pub async fn run_once(&self) -> Result<PassSummary, SyncError> {
        let Ok(_guard) = self.pass_guard.try_lock() else {
            warn!("🕰️ A reconciliation pass is already in flight. Dropping this trigger.");
            return Err(SyncError::PassInProgress);
        };
        let started = Instant::now();
        info!("🕰️ Reconciliation pass starting");
        let api = SyncApi::new(self.db.clone());
        let fetch_limit = self.sync_config.detail_fetch_limit;
        let woo_products = woo::sync_products(&self.woo, &api, self.sync_config.page_size).await?;
        let woo_orders = woo::sync_orders(&self.woo, &api, self.sync_config.page_size).await?;
        let window = self.sync_config.order_window_days;
        let amazon_orders = amazon::fetch_orders(&self.spapi, window).await;
        let amazon_saved = amazon::save_orders(&amazon_orders, &api).await?;
        let amazon_products = amazon::sync_products(&self.spapi, &amazon_orders, &api, fetch_limit).await?;
        let kindle_products =
            kindle::sync_catalog(&self.spapi, &api, &self.sync_config.kindle_keywords, fetch_limit).await?;
        let analytics = AnalyticsApi::new(self.db.clone());
        let totals = analytics.recompute_monthly_sales(SourceTag::Woocommerce).await?;
        analytics.apply_royalties(&totals, self.royalty_rate_bps).await?;
        let summary = PassSummary {
            woo_products,
            woo_orders,
            amazon_orders: amazon_saved,
            amazon_products,
            kindle_products,
            months: totals.len(),
        };
        info!("🕰️ Reconciliation pass finished in {:.1?}. {summary}", started.elapsed());
        Ok(summary)
    }

    /// The marketplace orders that touch the stored device catalog. Live fetch, no writes.
    pub async fn kindle_orders(&self) -> Result<Vec<Order>, StoreError> {
        let api = SyncApi::new(self.db.clone());
        kindle::device_orders(&self.spapi, &api, self.sync_config.order_window_days).await
    }

    /// Sales totals over the resolved device orders. Live fetch, no writes.
    pub async fn kindle_analytics(&self) -> Result<KindleAnalytics, StoreError> {
        let api = SyncApi::new(self.db.clone());
        kindle::device_analytics(&self.spapi, &api, self.sync_config.order_window_days).await
    }
}
