use serde::{Deserialize, Serialize};

//--------------------------------------     Authentication     ---------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LwaTokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

//--------------------------------------        Orders API      ---------------------------------------------------
// The orders API (v0) uses PascalCase field names and wraps its results in a `payload` envelope. Missing envelopes
// and missing arrays are tolerated everywhere, since the upstream omits them rather than sending empty ones.

/// The `{Amount, CurrencyCode}` pair that every monetary field in the orders and pricing APIs uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MoneyField {
    pub amount: Option<String>,
    pub currency_code: Option<String>,
}

impl MoneyField {
    /// The amount as decimal text, with omitted amounts reading as zero.
    pub fn amount_or_zero(&self) -> &str {
        self.amount.as_deref().unwrap_or("0.00")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SpOrder {
    pub amazon_order_id: Option<String>,
    pub order_status: Option<String>,
    pub order_total: Option<MoneyField>,
    pub purchase_date: Option<String>,
    pub last_update_date: Option<String>,
    pub marketplace_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SpOrderItem {
    #[serde(rename = "ASIN")]
    pub asin: Option<String>,
    pub order_item_id: Option<String>,
    pub title: Option<String>,
    pub quantity_ordered: Option<i64>,
    pub item_price: Option<MoneyField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GetOrdersResponse {
    pub payload: Option<OrdersPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OrdersPayload {
    pub orders: Vec<SpOrder>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GetOrderItemsResponse {
    pub payload: Option<OrderItemsPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OrderItemsPayload {
    pub amazon_order_id: Option<String>,
    pub order_items: Vec<SpOrderItem>,
}

//--------------------------------------       Catalog API      ---------------------------------------------------
// The catalog API (2022-04-01) switches to camelCase and does not use a payload envelope.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpCatalogItem {
    pub asin: String,
    pub summaries: Vec<SpItemSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpItemSummary {
    pub marketplace_id: Option<String>,
    pub item_name: Option<String>,
    pub manufacturer: Option<String>,
    pub brand: Option<String>,
    pub model_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCatalogItemsResponse {
    pub number_of_results: Option<i64>,
    pub items: Vec<SpCatalogItem>,
}

//--------------------------------------       Pricing API      ---------------------------------------------------
// Pricing (v0) goes back to PascalCase inside a payload envelope.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GetItemOffersResponse {
    pub payload: Option<ItemOffersPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ItemOffersPayload {
    pub offers: Vec<SpOffer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SpOffer {
    pub listing_price: Option<MoneyField>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize_order_listing() {
        let json = r#"{
          "payload": {
            "Orders": [
              {
                "AmazonOrderId": "171-3061726-4094731",
                "OrderStatus": "Shipped",
                "OrderTotal": { "Amount": "499.00", "CurrencyCode": "INR" },
                "PurchaseDate": "2024-05-14T09:30:00Z",
                "LastUpdateDate": "2024-05-15T10:00:00Z"
              },
              { "AmazonOrderId": "171-3061726-4094732", "OrderStatus": "Pending" }
            ]
          }
        }"#;
        let response: GetOrdersResponse = serde_json::from_str(json).expect("valid order listing");
        let orders = response.payload.expect("payload present").orders;
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].amazon_order_id.as_deref(), Some("171-3061726-4094731"));
        assert_eq!(orders[0].order_total.as_ref().map(|t| t.amount_or_zero()), Some("499.00"));
        assert!(orders[1].order_total.is_none());
    }

    #[test]
    fn missing_payload_is_tolerated() {
        let response: GetOrdersResponse = serde_json::from_str("{}").expect("empty body still parses");
        assert!(response.payload.is_none());
    }

    #[test]
    fn deserialize_order_items() {
        let json = r#"{
          "payload": {
            "AmazonOrderId": "171-3061726-4094731",
            "OrderItems": [
              {
                "ASIN": "B0ABCDEF12",
                "OrderItemId": "68500914331",
                "Title": "The Long Walk",
                "QuantityOrdered": 2,
                "ItemPrice": { "Amount": "249.50", "CurrencyCode": "INR" }
              },
              { "Title": "Mystery item with no ASIN", "QuantityOrdered": 1 }
            ]
          }
        }"#;
        let response: GetOrderItemsResponse = serde_json::from_str(json).expect("valid item listing");
        let items = response.payload.expect("payload present").order_items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].asin.as_deref(), Some("B0ABCDEF12"));
        assert_eq!(items[0].quantity_ordered, Some(2));
        assert!(items[1].asin.is_none());
    }

    #[test]
    fn deserialize_catalog_item() {
        let json = r#"{
          "asin": "B0ABCDEF12",
          "summaries": [
            {
              "marketplaceId": "A21TJRUUN4KGV",
              "itemName": "The Long Walk",
              "manufacturer": "Dreambook Publishing",
              "brand": "Dreambook"
            }
          ]
        }"#;
        let item: SpCatalogItem = serde_json::from_str(json).expect("valid catalog item");
        assert_eq!(item.asin, "B0ABCDEF12");
        assert_eq!(item.summaries[0].item_name.as_deref(), Some("The Long Walk"));
        assert_eq!(item.summaries[0].model_number, None);
    }

    #[test]
    fn deserialize_item_offers() {
        let json = r#"{
          "payload": {
            "Offers": [
              { "ListingPrice": { "Amount": "349.00", "CurrencyCode": "INR" } },
              { "ListingPrice": { "Amount": "399.00", "CurrencyCode": "INR" } }
            ]
          }
        }"#;
        let response: GetItemOffersResponse = serde_json::from_str(json).expect("valid offer listing");
        let offers = response.payload.expect("payload present").offers;
        assert_eq!(offers[0].listing_price.as_ref().map(|p| p.amount_or_zero()), Some("349.00"));
    }
}
