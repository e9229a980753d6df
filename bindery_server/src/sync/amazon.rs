//! The marketplace connector.
//!
//! The marketplace has no "list my products" call, so the catalog is derived from the order stream: fetch the
//! trailing order window, collect the ASINs its line items reference, then look up catalog details and a current
//! price per unique ASIN. Detail lookups fan out with a bounded concurrency limit so a growing catalog does not
//! stretch the pass linearly. A failure on any single order or ASIN is logged and skipped; it never aborts the
//! batch.
use bindery_engine::{
    db_types::{Order, Product, ProductId, SourceTag},
    traits::{CatalogStore, OrderStore},
    StoreError, SyncApi,
};
use chrono::{Duration, Utc};
use futures::{stream, StreamExt};
use log::*;
use spapi_tools::SpApi;

use crate::sync::normalize;

/// Fetches the trailing window of marketplace orders, with their line items, already normalized. Any upstream
/// failure degrades to an empty (or shorter) batch.
pub async fn fetch_orders(spapi: &SpApi, window_days: i64) -> Vec<Order> {
    let created_after = Utc::now() - Duration::days(window_days);
    let raw = match spapi.get_orders(created_after).await {
        Ok(orders) => orders,
        Err(e) => {
            warn!("📦️ Fetching the marketplace order window failed. Treating it as empty. {e}");
            return Vec::new();
        },
    };
    let mut orders = Vec::with_capacity(raw.len());
    for sp_order in &raw {
        let Some(id) = sp_order.amazon_order_id.as_deref() else {
            warn!("📦️ A marketplace order arrived without an order id. Skipping it.");
            continue;
        };
        let items = match spapi.get_order_items(id).await {
            Ok(items) => items,
            Err(e) => {
                warn!("📦️ Fetching the line items for order {id} failed. Carrying the order without them. {e}");
                Vec::new()
            },
        };
        if let Some(order) = normalize::order_from_sp(sp_order, &items) {
            orders.push(order);
        }
    }
    debug!("📦️ Fetched {} marketplace orders from the trailing {window_days}-day window", orders.len());
    orders
}

/// Upserts an already-fetched order batch. Returns the number of records saved.
pub async fn save_orders<B>(orders: &[Order], api: &SyncApi<B>) -> Result<usize, StoreError>
where B: CatalogStore + OrderStore {
    for order in orders {
        api.save_order(order).await?;
    }
    info!("📦️ Marketplace orders reconciled. {} orders saved", orders.len());
    Ok(orders.len())
}

/// The unique ASINs referenced by the orders' line items, in first-seen order.
pub fn referenced_asins(orders: &[Order]) -> Vec<ProductId> {
    let mut seen = std::collections::HashSet::new();
    let mut asins = Vec::new();
    for item in orders.iter().flat_map(|o| o.line_items.iter()) {
        let Some(id) = item.id.as_ref() else { continue };
        if seen.insert(id.clone()) {
            asins.push(id.clone());
        }
    }
    asins
}

/// Derives and reconciles the marketplace catalog from an order batch. Returns the number of products upserted.
pub async fn sync_products<B>(
    spapi: &SpApi,
    orders: &[Order],
    api: &SyncApi<B>,
    fetch_limit: usize,
) -> Result<usize, StoreError>
where
    B: CatalogStore + OrderStore,
{
    let asins = referenced_asins(orders);
    debug!("📦️ The order window references {} unique ASINs", asins.len());
    let products = fetch_details(spapi, &asins, SourceTag::Amazon, fetch_limit).await;
    let count = products.len();
    for product in &products {
        api.save_product(product).await?;
    }
    info!("📦️ Marketplace catalog reconciled. {count} of {} ASINs resolved", asins.len());
    Ok(count)
}

/// Looks up catalog details and a current price for each ASIN, at most `fetch_limit` lookups in flight. ASINs the
/// catalog cannot resolve are dropped with a log entry.
pub(crate) async fn fetch_details(
    spapi: &SpApi,
    asins: &[ProductId],
    source: SourceTag,
    fetch_limit: usize,
) -> Vec<Product> {
    let lookups: Vec<_> = asins.iter().map(|asin| fetch_detail(spapi, asin, source)).collect();
    stream::iter(lookups)
        .buffer_unordered(fetch_limit.max(1))
        .filter_map(|product| async move { product })
        .collect()
        .await
}

async fn fetch_detail(spapi: &SpApi, asin: &ProductId, source: SourceTag) -> Option<Product> {
    let item = match spapi.get_catalog_item(asin.as_str()).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            debug!("📦️ ASIN {asin} is not in the catalog. Skipping it.");
            return None;
        },
        Err(e) => {
            warn!("📦️ Fetching catalog details for {asin} failed. Skipping it. {e}");
            return None;
        },
    };
    let price = price_for(spapi, asin.as_str()).await;
    Some(normalize::product_from_catalog_item(asin.as_str(), item.summaries.first(), price, source))
}

/// The current "New" condition listing price for an ASIN, reading missing offers and failures as zero.
pub(crate) async fn price_for(spapi: &SpApi, asin: &str) -> bindery_common::Money {
    match spapi.get_item_offers(asin).await {
        Ok(Some(price)) => normalize::money_from_field(Some(&price)),
        Ok(None) => {
            debug!("📦️ No current offer for {asin}. Pricing it at zero.");
            bindery_common::Money::ZERO
        },
        Err(e) => {
            warn!("📦️ Fetching the price for {asin} failed. Pricing it at zero. {e}");
            bindery_common::Money::ZERO
        },
    }
}

#[cfg(test)]
mod test {
    use bindery_common::Money;
    use bindery_engine::db_types::LineItem;
    use serde_json::Value;

    use super::*;

    fn order(id: &str, item_ids: &[Option<&str>]) -> Order {
        let line_items = item_ids
            .iter()
            .map(|pid| LineItem {
                id: pid.map(ProductId::from),
                name: "item".into(),
                quantity: 1,
                price: Money::ZERO,
            })
            .collect();
        Order {
            id: id.into(),
            status: "Shipped".into(),
            total: Money::ZERO,
            currency: "INR".into(),
            date_created: "2024-05-14T09:30:00Z".into(),
            date_modified: String::new(),
            customer_id: None,
            billing: Value::Null,
            shipping: Value::Null,
            line_items,
            source: SourceTag::Amazon,
            last_synced_at: None,
        }
    }

    #[test]
    fn asins_deduplicate_in_first_seen_order() {
        let orders = vec![
            order("1", &[Some("B002"), Some("B001")]),
            order("2", &[Some("B001"), None]),
            order("3", &[Some("B003")]),
        ];
        let asins = referenced_asins(&orders);
        let asins: Vec<&str> = asins.iter().map(ProductId::as_str).collect();
        assert_eq!(asins, vec!["B002", "B001", "B003"]);
    }

    #[test]
    fn orders_without_product_references_yield_no_asins() {
        let orders = vec![order("1", &[None]), order("2", &[])];
        assert!(referenced_asins(&orders).is_empty());
    }
}
