use crate::{
    db_types::{Order, OrderId, SourceTag},
    traits::StoreError,
};

/// Persistence contract for orders, regardless of which marketplace they came from.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Inserts the order, or overwrites the existing record carrying the same id.
    async fn upsert_order(&self, order: &Order) -> Result<(), StoreError>;

    async fn fetch_order(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    async fn fetch_orders_for_source(&self, source: SourceTag) -> Result<Vec<Order>, StoreError>;

    async fn fetch_all_orders(&self) -> Result<Vec<Order>, StoreError>;
}
