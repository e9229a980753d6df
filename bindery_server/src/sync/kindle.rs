//! The device-catalog connector.
//!
//! The device catalog is seeded by a keyword search against the marketplace catalog rather than by the order
//! stream. "Device orders" are then a derived view: the marketplace order window filtered through the
//! cross-reference resolver against the product ids already stored under the `kindle` tag. The products must have
//! been reconciled in the same or an earlier pass, or the view is empty.
use bindery_engine::{
    cross_ref::orders_referencing,
    db_types::{Order, ProductId, SourceTag},
    total_sales,
    traits::{CatalogStore, OrderStore},
    StoreError, SyncApi,
};
use log::*;
use spapi_tools::SpApi;

use crate::{data_objects::KindleAnalytics, sync::amazon};

/// Reconciles the device catalog from a keyword search. Returns the number of products upserted.
pub async fn sync_catalog<B>(
    spapi: &SpApi,
    api: &SyncApi<B>,
    keywords: &str,
    fetch_limit: usize,
) -> Result<usize, StoreError>
where
    B: CatalogStore + OrderStore,
{
    let items = match spapi.search_catalog_items(keywords).await {
        Ok(items) => items,
        Err(e) => {
            warn!("📚️ The device catalog search failed. Treating it as an empty result. {e}");
            return Ok(0);
        },
    };
    let asins: Vec<ProductId> = items
        .iter()
        .filter(|item| {
            if item.asin.is_empty() {
                warn!("📚️ A catalog search result arrived without an ASIN. Skipping it.");
            }
            !item.asin.is_empty()
        })
        .map(|item| ProductId::new(item.asin.clone()))
        .collect();
    let products = amazon::fetch_details(spapi, &asins, SourceTag::Kindle, fetch_limit).await;
    let count = products.len();
    for product in &products {
        api.save_product(product).await?;
    }
    info!("📚️ Device catalog reconciled. {count} of {} search results saved", items.len());
    Ok(count)
}

/// The marketplace orders in the trailing window whose line items touch the stored device catalog. A live fetch
/// and a pure filter; nothing is written.
pub async fn device_orders<B>(spapi: &SpApi, api: &SyncApi<B>, window_days: i64) -> Result<Vec<Order>, StoreError>
where B: CatalogStore + OrderStore {
    let orders = amazon::fetch_orders(spapi, window_days).await;
    let ids = api.product_ids_for_source(SourceTag::Kindle).await?;
    let matched = orders_referencing(&orders, &ids);
    debug!("📚️ {} of {} marketplace orders reference the {} stored device products", matched.len(), orders.len(), ids.len());
    Ok(matched)
}

/// Read-only sales totals over the resolved device orders.
pub async fn device_analytics<B>(
    spapi: &SpApi,
    api: &SyncApi<B>,
    window_days: i64,
) -> Result<KindleAnalytics, StoreError>
where
    B: CatalogStore + OrderStore,
{
    let orders = device_orders(spapi, api, window_days).await?;
    Ok(KindleAnalytics { order_count: orders.len(), total_sales: total_sales(&orders) })
}
