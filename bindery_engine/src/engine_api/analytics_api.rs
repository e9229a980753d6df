//! Monthly sales and royalty aggregation.

use std::{collections::BTreeMap, fmt::Debug};

use bindery_common::Money;
use log::*;

use crate::{
    db_types::{MonthlyAggregate, Order, SourceTag},
    helpers::month_key,
    traits::{AnalyticsStore, OrderStore, StoreError},
};

/// `AnalyticsApi` derives the monthly aggregates from stored orders and persists them. Recomputation always runs
/// over the full order history of the source, so the results converge no matter how often a sync pass repeats.
pub struct AnalyticsApi<B> {
    db: B,
}

impl<B: Debug> Debug for AnalyticsApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AnalyticsApi ({:?})", self.db)
    }
}

impl<B> AnalyticsApi<B>
where B: OrderStore + AnalyticsStore
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Recomputes the per-month sales totals from every stored order belonging to `source`, writing each month's
    /// total back to the analytics table. Returns the computed totals, keyed by month.
    pub async fn recompute_monthly_sales(&self, source: SourceTag) -> Result<BTreeMap<String, Money>, StoreError> {
        let orders = self.db.fetch_orders_for_source(source).await?;
        let totals = monthly_sales_totals(&orders);
        for (month, total) in &totals {
            self.db.upsert_monthly_sales(month, *total).await?;
        }
        info!("💰️ Recomputed sales for {} orders from {source} into {} month buckets", orders.len(), totals.len());
        Ok(totals)
    }

    /// Applies the royalty rate (in basis points) to each month's sales total and persists the result.
    pub async fn apply_royalties(&self, totals: &BTreeMap<String, Money>, rate_bps: i64) -> Result<(), StoreError> {
        for (month, total) in totals {
            let royalty = total.apply_rate_bps(rate_bps);
            self.db.upsert_monthly_royalties(month, royalty).await?;
            trace!("💰️ Royalties for {month}: {royalty} on sales of {total}");
        }
        Ok(())
    }

    pub async fn month(&self, month: &str) -> Result<Option<MonthlyAggregate>, StoreError> {
        self.db.fetch_month(month).await
    }

    pub async fn all_months(&self) -> Result<Vec<MonthlyAggregate>, StoreError> {
        self.db.fetch_all_months().await
    }
}

/// Sums order totals into calendar-month buckets keyed `YYYY-MM`. Orders whose creation date carries no parseable
/// month are skipped with a warning and counted nowhere.
pub fn monthly_sales_totals(orders: &[Order]) -> BTreeMap<String, Money> {
    let mut totals = BTreeMap::new();
    for order in orders {
        let Some(month) = month_key(&order.date_created) else {
            warn!("💰️ Order {} has an unusable creation date ({}). It will not be counted.", order.id, order.date_created);
            continue;
        };
        *totals.entry(month).or_insert(Money::ZERO) += order.total;
    }
    totals
}

/// The grand total over a set of orders.
pub fn total_sales(orders: &[Order]) -> Money {
    orders.iter().map(|o| o.total).sum()
}
