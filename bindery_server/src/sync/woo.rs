//! The storefront connector: walks the WooCommerce product and order listings page by page.
//!
//! Records are upserted as they are read, so a failure partway through a walk leaves the earlier pages committed.
//! Any request failure ends the walk for this pass with a warning; the next scheduled pass picks up from scratch.
use bindery_engine::{
    traits::{CatalogStore, OrderStore},
    StoreError, SyncApi,
};
use log::*;
use woo_tools::WooApi;

use crate::sync::normalize;

/// Reconciles the full storefront product catalog. Returns the number of records upserted.
pub async fn sync_products<B>(woo: &WooApi, api: &SyncApi<B>, page_size: u32) -> Result<usize, StoreError>
where B: CatalogStore + OrderStore {
    let mut page = 1;
    let mut count = 0;
    loop {
        let batch = match woo.fetch_products(page, page_size).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("🛒️ Fetching page {page} of the product listing failed. Keeping the {count} records reconciled so far. {e}");
                break;
            },
        };
        if batch.is_empty() {
            break;
        }
        for raw in &batch {
            let Some(product) = normalize::product_from_woo(raw) else { continue };
            api.save_product(&product).await?;
            count += 1;
        }
        page += 1;
    }
    info!("🛒️ Storefront catalog reconciled. {count} products over {page} requests");
    Ok(count)
}

/// Reconciles the full storefront order history. Returns the number of records upserted.
pub async fn sync_orders<B>(woo: &WooApi, api: &SyncApi<B>, page_size: u32) -> Result<usize, StoreError>
where B: CatalogStore + OrderStore {
    let mut page = 1;
    let mut count = 0;
    loop {
        let batch = match woo.fetch_orders(page, page_size).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("🛒️ Fetching page {page} of the order listing failed. Keeping the {count} records reconciled so far. {e}");
                break;
            },
        };
        if batch.is_empty() {
            break;
        }
        for raw in &batch {
            let Some(order) = normalize::order_from_woo(raw) else { continue };
            api.save_order(&order).await?;
            count += 1;
        }
        page += 1;
    }
    info!("🛒️ Storefront orders reconciled. {count} orders over {page} requests");
    Ok(count)
}
