use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use log::*;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config::SpApiConfig,
    data_objects::{
        GetItemOffersResponse, GetOrderItemsResponse, GetOrdersResponse, LwaTokenResponse, MoneyField,
        SearchCatalogItemsResponse, SpCatalogItem, SpOrder, SpOrderItem,
    },
    error::SpApiError,
};

/// Access tokens are considered expired this many seconds before they actually are, so that a token handed to a
/// request cannot lapse mid-flight.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

#[derive(Clone)]
pub struct SpApi {
    config: SpApiConfig,
    client: Arc<Client>,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl SpApi {
    pub fn new(config: SpApiConfig) -> Result<Self, SpApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| SpApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client), token: Arc::new(Mutex::new(None)) })
    }

    /// Returns a valid LWA access token, refreshing the cached one first if it has expired.
    async fn access_token(&self) -> Result<String, SpApiError> {
        {
            let guard = self.token.lock().map_err(|e| SpApiError::TokenRefresh(e.to_string()))?;
            if let Some(token) = guard.as_ref() {
                if token.is_valid() {
                    return Ok(token.value.clone());
                }
            }
        }
        let fresh = self.refresh_access_token().await?;
        let value = fresh.value.clone();
        let mut guard = self.token.lock().map_err(|e| SpApiError::TokenRefresh(e.to_string()))?;
        *guard = Some(fresh);
        Ok(value)
    }

    async fn refresh_access_token(&self) -> Result<CachedToken, SpApiError> {
        debug!("📦️ Refreshing the LWA access token");
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.config.refresh_token.reveal()),
            ("client_id", self.config.client_id.reveal()),
            ("client_secret", self.config.client_secret.reveal()),
        ];
        let response = self
            .client
            .post(&self.config.auth_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| SpApiError::TokenRefresh(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SpApiError::TokenRefresh(format!("Error {status}. {message}")));
        }
        let token = response
            .json::<LwaTokenResponse>()
            .await
            .map_err(|e| SpApiError::TokenRefresh(e.to_string()))?;
        let expires_at = Utc::now() + Duration::seconds(token.expires_in - TOKEN_EXPIRY_MARGIN_SECS);
        trace!("📦️ Access token refreshed. It is valid until {expires_at}");
        Ok(CachedToken { value: token.access_token, expires_at })
    }

    pub async fn rest_get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, SpApiError> {
        let token = self.access_token().await?;
        let url = format!("{}{path}", self.config.endpoint.trim_end_matches('/'));
        trace!("📦️ Sending GET request to {url}");
        let mut request = self.client.get(url).header("x-amz-access-token", token);
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request.send().await.map_err(|e| SpApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            response.json::<T>().await.map_err(|e| SpApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| SpApiError::RestResponseError(e.to_string()))?;
            Err(SpApiError::QueryError { status, message })
        }
    }

    /// Fetches every order created after the given instant. A response without an order array reads as an empty
    /// batch rather than an error.
    pub async fn get_orders(&self, created_after: DateTime<Utc>) -> Result<Vec<SpOrder>, SpApiError> {
        let created_after = created_after.to_rfc3339_opts(SecondsFormat::Secs, true);
        debug!("📦️ Fetching orders created after {created_after}");
        let response = self
            .rest_get::<GetOrdersResponse>("/orders/v0/orders", &[
                ("MarketplaceIds", self.config.marketplace_id.as_str()),
                ("CreatedAfter", created_after.as_str()),
            ])
            .await?;
        let orders = match response.payload {
            Some(payload) => payload.orders,
            None => {
                warn!("📦️ The order listing arrived without a payload. Treating it as an empty batch.");
                Vec::new()
            },
        };
        debug!("📦️ Fetched {} orders", orders.len());
        Ok(orders)
    }

    pub async fn get_order_items(&self, order_id: &str) -> Result<Vec<SpOrderItem>, SpApiError> {
        let path = format!("/orders/v0/orders/{order_id}/orderItems");
        let response = self.rest_get::<GetOrderItemsResponse>(&path, &[]).await?;
        let items = match response.payload {
            Some(payload) => payload.order_items,
            None => {
                warn!("📦️ The item listing for order {order_id} arrived without a payload. Treating it as empty.");
                Vec::new()
            },
        };
        trace!("📦️ Order {order_id} has {} line items", items.len());
        Ok(items)
    }

    /// Fetches catalog details for a single ASIN. An ASIN the catalog does not know returns `None` rather than an
    /// error.
    pub async fn get_catalog_item(&self, asin: &str) -> Result<Option<SpCatalogItem>, SpApiError> {
        let path = format!("/catalog/2022-04-01/items/{asin}");
        let result = self
            .rest_get::<SpCatalogItem>(&path, &[
                ("marketplaceIds", self.config.marketplace_id.as_str()),
                ("includedData", "summaries"),
            ])
            .await;
        match result {
            Ok(item) => Ok(Some(item)),
            Err(SpApiError::QueryError { status: 404, .. }) => {
                debug!("📦️ ASIN {asin} is not present in the catalog");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    pub async fn search_catalog_items(&self, keywords: &str) -> Result<Vec<SpCatalogItem>, SpApiError> {
        debug!("📚️ Searching the catalog for \"{keywords}\"");
        let response = self
            .rest_get::<SearchCatalogItemsResponse>("/catalog/2022-04-01/items", &[
                ("keywords", keywords),
                ("marketplaceIds", self.config.marketplace_id.as_str()),
                ("includedData", "summaries"),
            ])
            .await?;
        debug!("📚️ The catalog search matched {} items", response.items.len());
        Ok(response.items)
    }

    /// Fetches the best current "New" condition listing price for an ASIN, or `None` when nothing is on offer.
    pub async fn get_item_offers(&self, asin: &str) -> Result<Option<MoneyField>, SpApiError> {
        let path = format!("/products/pricing/v0/items/{asin}/offers");
        let response = self
            .rest_get::<GetItemOffersResponse>(&path, &[
                ("MarketplaceId", self.config.marketplace_id.as_str()),
                ("ItemCondition", "New"),
            ])
            .await?;
        let price = response
            .payload
            .and_then(|p| p.offers.into_iter().next())
            .and_then(|offer| offer.listing_price);
        Ok(price)
    }
}
