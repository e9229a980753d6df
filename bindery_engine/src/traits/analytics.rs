use bindery_common::Money;

use crate::{db_types::MonthlyAggregate, traits::StoreError};

/// Persistence contract for the monthly sales and royalty aggregates.
///
/// The two value columns are written independently, so recomputing sales never clobbers a royalty figure and vice
/// versa. A month row is created the first time either column is written for it.
#[allow(async_fn_in_trait)]
pub trait AnalyticsStore {
    async fn upsert_monthly_sales(&self, month: &str, total_sales: Money) -> Result<(), StoreError>;

    async fn upsert_monthly_royalties(&self, month: &str, royalties: Money) -> Result<(), StoreError>;

    async fn fetch_month(&self, month: &str) -> Result<Option<MonthlyAggregate>, StoreError>;

    /// Fetches every aggregate row, ordered by month ascending.
    async fn fetch_all_months(&self) -> Result<Vec<MonthlyAggregate>, StoreError>;
}
