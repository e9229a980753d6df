use std::collections::HashSet;

use crate::{
    db_types::{Product, ProductId, SourceTag},
    traits::StoreError,
};

/// Persistence contract for the product catalog.
///
/// Every save is an upsert keyed on the product id. The sync machinery never deletes records: a product that
/// disappears upstream simply stops having its `last_synced_at` column bumped, which keeps the catalog auditable
/// after the upstream loses history.
#[allow(async_fn_in_trait)]
pub trait CatalogStore {
    /// Inserts the product, or overwrites the existing record carrying the same id.
    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError>;

    /// Fetches a single product by id. `None` if no such record exists.
    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    async fn fetch_products_for_source(&self, source: SourceTag) -> Result<Vec<Product>, StoreError>;

    /// Fetches just the ids of the products belonging to the given source.
    async fn fetch_product_ids_for_source(&self, source: SourceTag) -> Result<HashSet<ProductId>, StoreError>;

    async fn fetch_all_products(&self) -> Result<Vec<Product>, StoreError>;
}
