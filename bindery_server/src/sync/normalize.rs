//! The normalizer: pure mappings from each upstream's raw record shape into the unified entity shapes.
//!
//! The rules are the same for every source. A record that arrives without its natural identifier is skipped with a
//! warning and never fails the batch. Every optional field falls back to a documented default, and monetary fields
//! always normalize to [`Money`] whether the upstream sent flat decimal text or a nested `{Amount, CurrencyCode}`
//! object.
use bindery_common::Money;
use bindery_engine::db_types::{CategoryTag, ImageRef, LineItem, Order, OrderId, Product, ProductId, SourceTag};
use log::*;
use serde_json::json;
use spapi_tools::{MoneyField, SpItemSummary, SpOrder, SpOrderItem};
use woo_tools::{WooOrder, WooProduct};

pub const DEFAULT_NAME: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_SHORT_DESCRIPTION: &str = "No short description available";
/// Catalog items report their title through a summary block, which is sometimes absent entirely.
pub const DEFAULT_CATALOG_TITLE: &str = "No title available";
pub const DEFAULT_CURRENCY: &str = "USD";

// Physical and publisher metadata for marketplace catalog entries. The catalog API does not expose these, and
// every title in the account shares them, so they are merged in as constants.
const PUBLISHER: &str = "Dreambook Publishing";
const PAGES: i64 = 43;
const ITEM_WEIGHT: &str = "300 g";
const DIMENSIONS: &str = "22 x 15 x 3 cm";
const COUNTRY_OF_ORIGIN: &str = "India";
const PACKER: &str = "info@dreambookpublishing.com";
const GENERIC_NAME: &str = "Book";
const UNSPSC_CODE: &str = "55101500";

/// Parses decimal text into [`Money`], reading absent or unusable amounts as zero.
pub fn money_or_zero(amount: Option<&str>) -> Money {
    match amount {
        None => Money::ZERO,
        Some(a) => Money::from_decimal_str(a).unwrap_or_else(|e| {
            warn!("🧾️ Unusable monetary amount \"{a}\". Treating it as zero. {e}");
            Money::ZERO
        }),
    }
}

/// Extracts the amount from a nested `{Amount, CurrencyCode}` field, reading absent fields as zero.
pub fn money_from_field(field: Option<&MoneyField>) -> Money {
    field.map(|f| money_or_zero(Some(f.amount_or_zero()))).unwrap_or(Money::ZERO)
}

fn text_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Maps a storefront product into the unified shape. `None` when the record carries no id.
pub fn product_from_woo(raw: &WooProduct) -> Option<Product> {
    let Some(id) = raw.id else {
        warn!("🧾️ A storefront product arrived without an id (name: \"{}\"). Skipping it.", raw.name);
        return None;
    };
    Some(Product {
        id: ProductId::new(id.to_string()),
        name: text_or(&raw.name, DEFAULT_NAME),
        price: money_or_zero(raw.price.as_deref()),
        description: raw.description.clone().filter(|d| !d.is_empty()).unwrap_or_else(|| DEFAULT_DESCRIPTION.into()),
        short_description: raw
            .short_description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_SHORT_DESCRIPTION.into()),
        sku: raw.sku.clone().unwrap_or_default(),
        stock_quantity: raw.stock_quantity.unwrap_or(0),
        images: raw.images.iter().map(|i| ImageRef { src: i.src.clone() }).collect(),
        categories: raw.categories.iter().map(|c| CategoryTag { id: c.id, name: c.name.clone() }).collect(),
        source: SourceTag::Woocommerce,
        author: String::new(),
        publisher: String::new(),
        pages: 0,
        item_weight: String::new(),
        dimensions: String::new(),
        country_of_origin: String::new(),
        packer: String::new(),
        generic_name: String::new(),
        unspsc_code: String::new(),
        date_created: raw.date_created.clone().unwrap_or_default(),
        date_modified: raw.date_modified.clone().unwrap_or_default(),
        last_synced_at: None,
    })
}

/// Maps a storefront order into the unified shape. `None` when the record carries no id.
pub fn order_from_woo(raw: &WooOrder) -> Option<Order> {
    let Some(id) = raw.id else {
        warn!("🧾️ A storefront order arrived without an id (status: \"{}\"). Skipping it.", raw.status);
        return None;
    };
    let line_items = raw
        .line_items
        .iter()
        .map(|item| LineItem {
            id: item.product_id.map(|pid| ProductId::new(pid.to_string())),
            name: text_or(&item.name, DEFAULT_NAME),
            quantity: item.quantity,
            price: item.price.and_then(|p| Money::from_f64(p).ok()).unwrap_or(Money::ZERO),
        })
        .collect();
    Some(Order {
        id: OrderId::new(id.to_string()),
        status: raw.status.clone(),
        total: money_or_zero(raw.total.as_deref()),
        currency: raw.currency.clone().unwrap_or_else(|| DEFAULT_CURRENCY.into()),
        date_created: raw.date_created.clone().unwrap_or_default(),
        date_modified: raw.date_modified.clone().unwrap_or_default(),
        customer_id: raw.customer_id,
        billing: raw.billing.clone(),
        shipping: raw.shipping.clone(),
        line_items,
        source: SourceTag::Woocommerce,
        last_synced_at: None,
    })
}

/// Maps a marketplace order and its separately-fetched line items into the unified shape. `None` when the order
/// carries no id.
pub fn order_from_sp(raw: &SpOrder, items: &[SpOrderItem]) -> Option<Order> {
    let Some(id) = raw.amazon_order_id.as_deref() else {
        warn!("🧾️ A marketplace order arrived without an order id. Skipping it.");
        return None;
    };
    let line_items = items
        .iter()
        .map(|item| LineItem {
            id: item.asin.clone().map(ProductId::new),
            name: item.title.clone().filter(|t| !t.is_empty()).unwrap_or_else(|| DEFAULT_NAME.into()),
            quantity: item.quantity_ordered.unwrap_or(0),
            price: money_from_field(item.item_price.as_ref()),
        })
        .collect();
    Some(Order {
        id: OrderId::new(id),
        status: raw.order_status.clone().unwrap_or_default(),
        total: money_from_field(raw.order_total.as_ref()),
        currency: raw
            .order_total
            .as_ref()
            .and_then(|t| t.currency_code.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.into()),
        date_created: raw.purchase_date.clone().unwrap_or_default(),
        date_modified: raw.last_update_date.clone().unwrap_or_default(),
        customer_id: None,
        billing: json!({}),
        shipping: json!({}),
        line_items,
        source: SourceTag::Amazon,
        last_synced_at: None,
    })
}

/// Builds a product from a catalog lookup: the ASIN, the summary block (when the catalog sent one), and the price
/// from the separate offers lookup, merged with the publisher metadata constants.
pub fn product_from_catalog_item(asin: &str, summary: Option<&SpItemSummary>, price: Money, source: SourceTag) -> Product {
    let name = summary
        .and_then(|s| s.item_name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_CATALOG_TITLE.into());
    // The catalog summary has no author field of its own; the manufacturer is the imprint and stands in for it.
    let author = summary
        .and_then(|s| s.manufacturer.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.into());
    Product {
        id: ProductId::new(asin),
        name,
        price,
        description: DEFAULT_DESCRIPTION.into(),
        short_description: DEFAULT_SHORT_DESCRIPTION.into(),
        sku: asin.to_string(),
        stock_quantity: 0,
        images: Vec::new(),
        categories: Vec::new(),
        source,
        author,
        publisher: PUBLISHER.into(),
        pages: PAGES,
        item_weight: ITEM_WEIGHT.into(),
        dimensions: DIMENSIONS.into(),
        country_of_origin: COUNTRY_OF_ORIGIN.into(),
        packer: PACKER.into(),
        generic_name: GENERIC_NAME.into(),
        unspsc_code: UNSPSC_CODE.into(),
        date_created: String::new(),
        date_modified: String::new(),
        last_synced_at: None,
    }
}
