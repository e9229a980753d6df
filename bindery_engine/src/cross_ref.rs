//! Cross-referencing of orders against a product subset.
//!
//! The marketplace reports one undifferentiated order stream, so "orders for the device catalog" is a derived view:
//! an order belongs to the view when one of its line items references a product already stored in that catalog
//! subset. The filter is pure and takes the subset as an argument; it never queries or writes storage itself.
use std::collections::HashSet;

use crate::db_types::{Order, ProductId};

/// Returns the orders whose line items reference at least one of the given product ids.
///
/// An empty id set short-circuits to an empty result, so a caller that has not stored any catalog entries yet never
/// classifies anything.
pub fn orders_referencing(orders: &[Order], product_ids: &HashSet<ProductId>) -> Vec<Order> {
    if product_ids.is_empty() {
        return Vec::new();
    }
    orders
        .iter()
        .filter(|order| {
            order.line_items.iter().any(|item| item.id.as_ref().is_some_and(|id| product_ids.contains(id)))
        })
        .cloned()
        .collect()
}
