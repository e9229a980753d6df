use bindery_common::Money;
use sqlx::SqliteConnection;

use crate::{db_types::MonthlyAggregate, traits::StoreError};

/// Writes the sales total for a month, creating the row if needed. The royalty column is left untouched so that the
/// two figures can be recomputed independently.
pub async fn upsert_monthly_sales(
    month: &str,
    total_sales: Money,
    conn: &mut SqliteConnection,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
            INSERT INTO monthly_analytics (month, total_sales) VALUES ($1, $2)
            ON CONFLICT (month) DO UPDATE SET
                total_sales = excluded.total_sales,
                updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(month)
    .bind(total_sales)
    .execute(conn)
    .await?;
    Ok(())
}

/// Writes the royalty figure for a month, creating the row if needed. The sales column is left untouched.
pub async fn upsert_monthly_royalties(
    month: &str,
    royalties: Money,
    conn: &mut SqliteConnection,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
            INSERT INTO monthly_analytics (month, royalties) VALUES ($1, $2)
            ON CONFLICT (month) DO UPDATE SET
                royalties = excluded.royalties,
                updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(month)
    .bind(royalties)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn fetch_month(month: &str, conn: &mut SqliteConnection) -> Result<Option<MonthlyAggregate>, StoreError> {
    let row = sqlx::query_as("SELECT * FROM monthly_analytics WHERE month = $1")
        .bind(month)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn fetch_all_months(conn: &mut SqliteConnection) -> Result<Vec<MonthlyAggregate>, StoreError> {
    let rows = sqlx::query_as("SELECT * FROM monthly_analytics ORDER BY month").fetch_all(conn).await?;
    Ok(rows)
}
