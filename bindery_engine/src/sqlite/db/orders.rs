use sqlx::{types::Json, SqliteConnection};

use crate::{
    db_types::{Order, OrderId, SourceTag},
    traits::StoreError,
};

/// Inserts the order, or replaces every column of the existing row with the same id. `last_synced_at` is bumped to
/// the current time on both paths.
pub async fn upsert_order(order: &Order, conn: &mut SqliteConnection) -> Result<(), StoreError> {
    sqlx::query(
        r#"
            INSERT INTO orders (
                id, status, total, currency, date_created, date_modified, customer_id, billing, shipping,
                line_items, source
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                status = excluded.status,
                total = excluded.total,
                currency = excluded.currency,
                date_created = excluded.date_created,
                date_modified = excluded.date_modified,
                customer_id = excluded.customer_id,
                billing = excluded.billing,
                shipping = excluded.shipping,
                line_items = excluded.line_items,
                source = excluded.source,
                last_synced_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&order.id)
    .bind(&order.status)
    .bind(order.total)
    .bind(&order.currency)
    .bind(&order.date_created)
    .bind(&order.date_modified)
    .bind(order.customer_id)
    .bind(Json(&order.billing))
    .bind(Json(&order.shipping))
    .bind(Json(&order.line_items))
    .bind(order.source)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn fetch_order(id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, StoreError> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id.as_str()).fetch_optional(conn).await?;
    Ok(order)
}

pub async fn fetch_orders_for_source(source: SourceTag, conn: &mut SqliteConnection) -> Result<Vec<Order>, StoreError> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE source = $1 ORDER BY date_created")
        .bind(source)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

pub async fn fetch_all_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, StoreError> {
    let orders = sqlx::query_as("SELECT * FROM orders ORDER BY date_created").fetch_all(conn).await?;
    Ok(orders)
}
