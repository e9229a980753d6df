use std::{env, fmt::Display, str::FromStr};

use log::*;
use spapi_tools::SpApiConfig;
use woo_tools::WooConfig;

const DEFAULT_BND_HOST: &str = "127.0.0.1";
const DEFAULT_BND_PORT: u16 = 8460;
const DEFAULT_ROYALTY_RATE_BPS: i64 = 1000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The author royalty rate, in basis points of monthly sales. 1000 bps is 10%.
    pub royalty_rate_bps: i64,
    pub sync: SyncConfig,
    /// Storefront credentials and endpoint.
    pub woo_config: WooConfig,
    /// Marketplace credentials and endpoints.
    pub spapi_config: SpApiConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BND_HOST.to_string(),
            port: DEFAULT_BND_PORT,
            database_url: String::default(),
            royalty_rate_bps: DEFAULT_ROYALTY_RATE_BPS,
            sync: SyncConfig::default(),
            woo_config: WooConfig::default(),
            spapi_config: SpApiConfig::default(),
        }
    }
}

/// Tunables for the reconciliation passes.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// How far back the marketplace order fetch reaches, in days.
    pub order_window_days: i64,
    /// Page size for the storefront listing walks.
    pub page_size: u32,
    /// How many per-item detail and pricing lookups may be in flight at once.
    pub detail_fetch_limit: usize,
    /// The catalog search phrase that seeds the device catalog.
    pub kindle_keywords: String,
    /// The pause between passes in the standalone sync runner.
    pub standalone_interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            order_window_days: 30,
            page_size: 100,
            detail_fetch_limit: 4,
            kindle_keywords: "Kindle E-reader".to_string(),
            standalone_interval_secs: 600,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("BND_HOST").ok().unwrap_or_else(|| DEFAULT_BND_HOST.into());
        let port = env::var("BND_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for BND_PORT. {e} Using the default, {DEFAULT_BND_PORT}, instead."
                    );
                    DEFAULT_BND_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_BND_PORT);
        let database_url = env::var("BND_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ BND_DATABASE_URL is not set. Please set it to the URL for the bindery database.");
            String::default()
        });
        let royalty_rate_bps = parse_var("BND_ROYALTY_RATE_BPS", DEFAULT_ROYALTY_RATE_BPS);
        let sync = SyncConfig::from_env_or_default();
        let woo_config = WooConfig::new_from_env_or_default();
        let spapi_config = SpApiConfig::new_from_env_or_default();
        Self { host, port, database_url, royalty_rate_bps, sync, woo_config, spapi_config }
    }
}

impl SyncConfig {
    pub fn from_env_or_default() -> Self {
        let defaults = SyncConfig::default();
        Self {
            order_window_days: parse_var("BND_ORDER_WINDOW_DAYS", defaults.order_window_days),
            page_size: parse_var("BND_PAGE_SIZE", defaults.page_size),
            detail_fetch_limit: parse_var("BND_DETAIL_FETCH_LIMIT", defaults.detail_fetch_limit),
            kindle_keywords: env::var("BND_KINDLE_KEYWORDS").ok().unwrap_or(defaults.kindle_keywords),
            standalone_interval_secs: parse_var("BND_SYNC_INTERVAL_SECS", defaults.standalone_interval_secs),
        }
    }
}

fn parse_var<T>(var: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
    T::Err: Display,
{
    env::var(var)
        .map(|s| {
            s.parse::<T>().unwrap_or_else(|e| {
                error!("🪛️ {s} is not a valid value for {var}. {e} Using the default, {default}, instead.");
                default
            })
        })
        .ok()
        .unwrap_or(default)
}
