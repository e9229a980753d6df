use bindery_common::Secret;
use log::*;

#[derive(Debug, Clone, Default)]
pub struct WooConfig {
    /// Base URL of the WooCommerce site, e.g. "https://shop.example.com". The REST prefix is appended by the client.
    pub base_url: String,
    pub consumer_key: Secret,
    pub consumer_secret: Secret,
}

impl WooConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("BND_WOO_URL").unwrap_or_else(|_| {
            warn!("🪛️ BND_WOO_URL not set, using (probably useless) default");
            "https://shop.example.com".to_string()
        });
        let consumer_key = Secret::new(std::env::var("BND_WOO_CONSUMER_KEY").unwrap_or_else(|_| {
            warn!("🪛️ BND_WOO_CONSUMER_KEY not set, using (probably useless) default");
            "ck_00000000000000".to_string()
        }));
        let consumer_secret = Secret::new(std::env::var("BND_WOO_CONSUMER_SECRET").unwrap_or_else(|_| {
            warn!("🪛️ BND_WOO_CONSUMER_SECRET not set, using (probably useless) default");
            "cs_00000000000000".to_string()
        }));
        Self { base_url, consumer_key, consumer_secret }
    }
}
