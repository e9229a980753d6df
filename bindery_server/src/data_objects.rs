//! Request and response bodies for the HTTP surface.
use std::fmt::Display;

use bindery_common::Money;
use bindery_engine::db_types::{MonthlyAggregate, Order, Product, ProductId, SourceTag};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }
}

/// A manual catalog entry. The ISBN becomes the natural id (and the SKU), so re-posting the same book overwrites
/// the earlier row rather than duplicating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBookEntry {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: Money,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub pages: Option<i64>,
}

impl From<NewBookEntry> for Product {
    fn from(entry: NewBookEntry) -> Self {
        Product {
            id: ProductId::new(entry.isbn.clone()),
            name: entry.title,
            price: entry.price,
            description: entry.description.unwrap_or_else(|| crate::sync::normalize::DEFAULT_DESCRIPTION.into()),
            short_description: entry
                .short_description
                .unwrap_or_else(|| crate::sync::normalize::DEFAULT_SHORT_DESCRIPTION.into()),
            sku: entry.isbn,
            stock_quantity: 0,
            images: Vec::new(),
            categories: Vec::new(),
            source: SourceTag::Manual,
            author: entry.author,
            publisher: entry.publisher.unwrap_or_default(),
            pages: entry.pages.unwrap_or(0),
            item_weight: String::new(),
            dimensions: String::new(),
            country_of_origin: String::new(),
            packer: String::new(),
            generic_name: String::new(),
            unspsc_code: String::new(),
            date_created: String::new(),
            date_modified: String::new(),
            last_synced_at: None,
        }
    }
}

/// The combined feed behind `GET /api/books`: everything the authoring dashboard renders in one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookReport {
    pub books: Vec<Product>,
    pub orders: Vec<Order>,
    pub analytics: Vec<MonthlyAggregate>,
}

/// Read-only totals over the marketplace orders that touch the stored device catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindleAnalytics {
    pub order_count: usize,
    pub total_sales: Money,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn a_manual_entry_becomes_a_manual_product() {
        let json = r#"{ "title": "Roadwork", "author": "R. Bachman", "isbn": "978-81-0000000-7", "price": "249.00" }"#;
        let entry: NewBookEntry = serde_json::from_str(json).expect("valid entry");
        let product = Product::from(entry);
        assert_eq!(product.id, ProductId::new("978-81-0000000-7"));
        assert_eq!(product.sku, "978-81-0000000-7");
        assert_eq!(product.source, SourceTag::Manual);
        assert_eq!(product.price, Money::from_cents(24900));
        assert_eq!(product.description, "No description available");
    }

    #[test]
    fn entries_without_required_fields_do_not_parse() {
        let missing_price = r#"{ "title": "Roadwork", "author": "R. Bachman", "isbn": "978-81-0000000-7" }"#;
        assert!(serde_json::from_str::<NewBookEntry>(missing_price).is_err());
        let missing_isbn = r#"{ "title": "Roadwork", "author": "R. Bachman", "price": "249.00" }"#;
        assert!(serde_json::from_str::<NewBookEntry>(missing_isbn).is_err());
    }
}
