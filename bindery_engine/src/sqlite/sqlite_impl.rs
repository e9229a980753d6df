//! `SqliteDatabase` is the concrete SQLite implementation of the engine's storage backend.
//!
//! Unsurprisingly, it uses SQLite underneath and implements all the traits defined in the [`crate::traits`] module.
use std::{collections::HashSet, fmt::Debug};

use bindery_common::Money;
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

use super::db::{analytics, db_url, new_pool, orders, products};
use crate::{
    db_types::{MonthlyAggregate, Order, OrderId, Product, ProductId, SourceTag},
    traits::{AnalyticsStore, CatalogStore, OrderStore, StoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, reading the url from the environment.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Creates the database file when the url points at one that does not exist yet.
    pub async fn create_database_if_missing(url: &str) -> Result<(), sqlx::Error> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("🗃️ Creating database at {url}");
            Sqlite::create_database(url).await?;
        }
        Ok(())
    }

    /// Brings the schema up to date by running any outstanding migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl CatalogStore for SqliteDatabase {
    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::upsert_product(product, &mut conn).await?;
        trace!("🗃️ Product {} ({}) saved", product.id, product.source);
        Ok(())
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_product(id, &mut conn).await
    }

    async fn fetch_products_for_source(&self, source: SourceTag) -> Result<Vec<Product>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_products_for_source(source, &mut conn).await
    }

    async fn fetch_product_ids_for_source(&self, source: SourceTag) -> Result<HashSet<ProductId>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_product_ids_for_source(source, &mut conn).await
    }

    async fn fetch_all_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_all_products(&mut conn).await
    }
}

impl OrderStore for SqliteDatabase {
    async fn upsert_order(&self, order: &Order) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::upsert_order(order, &mut conn).await?;
        trace!("🗃️ Order {} ({}) saved", order.id, order.source);
        Ok(())
    }

    async fn fetch_order(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order(id, &mut conn).await
    }

    async fn fetch_orders_for_source(&self, source: SourceTag) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders_for_source(source, &mut conn).await
    }

    async fn fetch_all_orders(&self) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_all_orders(&mut conn).await
    }
}

impl AnalyticsStore for SqliteDatabase {
    async fn upsert_monthly_sales(&self, month: &str, total_sales: Money) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        analytics::upsert_monthly_sales(month, total_sales, &mut conn).await?;
        trace!("🗃️ Sales for {month} set to {total_sales}");
        Ok(())
    }

    async fn upsert_monthly_royalties(&self, month: &str, royalties: Money) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        analytics::upsert_monthly_royalties(month, royalties, &mut conn).await?;
        trace!("🗃️ Royalties for {month} set to {royalties}");
        Ok(())
    }

    async fn fetch_month(&self, month: &str) -> Result<Option<MonthlyAggregate>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        analytics::fetch_month(month, &mut conn).await
    }

    async fn fetch_all_months(&self) -> Result<Vec<MonthlyAggregate>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        analytics::fetch_all_months(&mut conn).await
    }
}
