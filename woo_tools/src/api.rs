use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::de::DeserializeOwned;

use crate::{
    config::WooConfig,
    data_objects::{WooOrder, WooProduct},
    WooApiError,
};

// A hung storefront must not stall a whole reconciliation pass.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct WooApi {
    config: WooConfig,
    client: Arc<Client>,
}

impl WooApi {
    pub fn new(config: WooConfig) -> Result<Self, WooApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let credentials = format!("{}:{}", config.consumer_key.reveal(), config.consumer_secret.reveal());
        let val = HeaderValue::from_str(format!("Basic {}", base64::encode(credentials)).as_str())
            .map_err(|e| WooApiError::Initialization(e.to_string()))?;
        headers.insert(AUTHORIZATION, val);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WooApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, WooApiError> {
        let url = self.url(path);
        trace!("🛒️ Sending REST query: {url}");
        let mut req = self.client.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let response = req.send().await.map_err(|e| WooApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("🛒️ REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| WooApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| WooApiError::RestResponseError(e.to_string()))?;
            Err(WooApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/wp-json/wc/v3{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetches one page of the product catalog. An empty page means the listing is exhausted.
    pub async fn fetch_products(&self, page: u32, per_page: u32) -> Result<Vec<WooProduct>, WooApiError> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        debug!("🛒️ Fetching products (page {page})");
        let products = self
            .rest_get::<Vec<WooProduct>>("/products", &[("per_page", per_page.as_str()), ("page", page.as_str())])
            .await?;
        debug!("🛒️ Fetched {} products from page {page}", products.len());
        Ok(products)
    }

    /// Fetches one page of the order listing. An empty page means the listing is exhausted.
    pub async fn fetch_orders(&self, page: u32, per_page: u32) -> Result<Vec<WooOrder>, WooApiError> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        debug!("🛒️ Fetching orders (page {page})");
        let orders = self
            .rest_get::<Vec<WooOrder>>("/orders", &[("per_page", per_page.as_str()), ("page", page.as_str())])
            .await?;
        debug!("🛒️ Fetched {} orders from page {page}", orders.len());
        Ok(orders)
    }
}
