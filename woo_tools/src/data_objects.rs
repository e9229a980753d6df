use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product record as the WooCommerce REST API returns it. Everything except the id is optional in practice, so
/// missing fields deserialize to their defaults rather than failing the whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WooProduct {
    pub id: Option<u64>,
    pub name: String,
    pub price: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub sku: Option<String>,
    pub stock_quantity: Option<i64>,
    pub images: Vec<WooImage>,
    pub categories: Vec<WooCategory>,
    pub date_created: Option<String>,
    pub date_modified: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WooImage {
    pub src: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WooCategory {
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WooOrder {
    pub id: Option<u64>,
    pub status: String,
    pub total: Option<String>,
    pub currency: Option<String>,
    pub date_created: Option<String>,
    pub date_modified: Option<String>,
    pub customer_id: Option<i64>,
    /// Opaque address blobs. They are stored verbatim and never interpreted.
    pub billing: Value,
    pub shipping: Value,
    pub line_items: Vec<WooLineItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WooLineItem {
    pub product_id: Option<u64>,
    pub name: String,
    pub quantity: i64,
    /// Unlike product prices, line item prices come over the wire as JSON numbers.
    pub price: Option<f64>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserializes_a_product_listing() {
        let json = r#"[{
            "id": 4321,
            "name": "The Long Meadow",
            "price": "349.00",
            "description": "<p>A story.</p>",
            "short_description": "",
            "sku": "978-81-0000000-1",
            "stock_quantity": 12,
            "images": [{"id": 99, "src": "https://shop.example.com/img/meadow.jpg", "alt": ""}],
            "categories": [{"id": 15, "name": "Fiction"}],
            "date_created": "2024-01-05T09:30:00",
            "date_modified": "2024-02-11T17:02:44",
            "tax_status": "taxable"
        }]"#;
        let products: Vec<WooProduct> = serde_json::from_str(json).unwrap();
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.id, Some(4321));
        assert_eq!(p.name, "The Long Meadow");
        assert_eq!(p.price.as_deref(), Some("349.00"));
        assert_eq!(p.images[0].src, "https://shop.example.com/img/meadow.jpg");
        assert_eq!(p.categories[0].name, "Fiction");
    }

    #[test]
    fn tolerates_missing_product_fields() {
        let p: WooProduct = serde_json::from_str(r#"{"name": "Bare"}"#).unwrap();
        assert_eq!(p.id, None);
        assert!(p.images.is_empty());
        assert_eq!(p.stock_quantity, None);
    }

    #[test]
    fn deserializes_an_order() {
        let json = r#"{
            "id": 727,
            "status": "completed",
            "total": "698.00",
            "currency": "INR",
            "date_created": "2024-03-02T12:00:00",
            "customer_id": 8,
            "billing": {"first_name": "A", "city": "Pune"},
            "shipping": {},
            "line_items": [
                {"product_id": 4321, "name": "The Long Meadow", "quantity": 2, "price": 349.0}
            ]
        }"#;
        let order: WooOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, Some(727));
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].quantity, 2);
        assert_eq!(order.line_items[0].price, Some(349.0));
        assert_eq!(order.billing["city"], "Pune");
    }
}
