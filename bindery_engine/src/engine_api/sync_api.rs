//! Unified API for saving and reading reconciled records.

use std::{collections::HashSet, fmt::Debug};

use log::*;

use crate::{
    db_types::{Order, OrderId, Product, ProductId, SourceTag},
    traits::{CatalogStore, OrderStore, StoreError},
};

/// `SyncApi` is the record-level API of the engine. The marketplace connectors push every product and order they
/// see through one of the save methods, which upsert keyed on the upstream id, and the read methods serve both the
/// connectors and the HTTP layer.
pub struct SyncApi<B> {
    db: B,
}

impl<B: Debug> Debug for SyncApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SyncApi ({:?})", self.db)
    }
}

impl<B> SyncApi<B>
where B: CatalogStore + OrderStore
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn save_product(&self, product: &Product) -> Result<(), StoreError> {
        trace!("🗃️ Saving product {} from {}", product.id, product.source);
        self.db.upsert_product(product).await
    }

    pub async fn save_order(&self, order: &Order) -> Result<(), StoreError> {
        trace!("🗃️ Saving order {} from {}", order.id, order.source);
        self.db.upsert_order(order).await
    }

    /// Fetches a product by id. `None` if no such record exists.
    pub async fn product_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        self.db.fetch_product(id).await
    }

    /// Fetches the ids of every stored product belonging to the given source.
    pub async fn product_ids_for_source(&self, source: SourceTag) -> Result<HashSet<ProductId>, StoreError> {
        self.db.fetch_product_ids_for_source(source).await
    }

    pub async fn products_for_source(&self, source: SourceTag) -> Result<Vec<Product>, StoreError> {
        self.db.fetch_products_for_source(source).await
    }

    pub async fn all_products(&self) -> Result<Vec<Product>, StoreError> {
        self.db.fetch_all_products().await
    }

    pub async fn order_by_id(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        self.db.fetch_order(id).await
    }

    pub async fn orders_for_source(&self, source: SourceTag) -> Result<Vec<Order>, StoreError> {
        self.db.fetch_orders_for_source(source).await
    }

    pub async fn all_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.db.fetch_all_orders().await
    }
}
