use std::collections::HashSet;

use sqlx::{types::Json, SqliteConnection};

use crate::{
    db_types::{Product, ProductId, SourceTag},
    traits::StoreError,
};

/// Inserts the product, or replaces every column of the existing row with the same id. `last_synced_at` is bumped
/// to the current time on both paths.
pub async fn upsert_product(product: &Product, conn: &mut SqliteConnection) -> Result<(), StoreError> {
    sqlx::query(
        r#"
            INSERT INTO products (
                id, name, price, description, short_description, sku, stock_quantity, images, categories, source,
                author, publisher, pages, item_weight, dimensions, country_of_origin, packer, generic_name,
                unspsc_code, date_created, date_modified
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                price = excluded.price,
                description = excluded.description,
                short_description = excluded.short_description,
                sku = excluded.sku,
                stock_quantity = excluded.stock_quantity,
                images = excluded.images,
                categories = excluded.categories,
                source = excluded.source,
                author = excluded.author,
                publisher = excluded.publisher,
                pages = excluded.pages,
                item_weight = excluded.item_weight,
                dimensions = excluded.dimensions,
                country_of_origin = excluded.country_of_origin,
                packer = excluded.packer,
                generic_name = excluded.generic_name,
                unspsc_code = excluded.unspsc_code,
                date_created = excluded.date_created,
                date_modified = excluded.date_modified,
                last_synced_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.description)
    .bind(&product.short_description)
    .bind(&product.sku)
    .bind(product.stock_quantity)
    .bind(Json(&product.images))
    .bind(Json(&product.categories))
    .bind(product.source)
    .bind(&product.author)
    .bind(&product.publisher)
    .bind(product.pages)
    .bind(&product.item_weight)
    .bind(&product.dimensions)
    .bind(&product.country_of_origin)
    .bind(&product.packer)
    .bind(&product.generic_name)
    .bind(&product.unspsc_code)
    .bind(&product.date_created)
    .bind(&product.date_modified)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn fetch_product(id: &ProductId, conn: &mut SqliteConnection) -> Result<Option<Product>, StoreError> {
    let product =
        sqlx::query_as("SELECT * FROM products WHERE id = $1").bind(id.as_str()).fetch_optional(conn).await?;
    Ok(product)
}

pub async fn fetch_products_for_source(
    source: SourceTag,
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, StoreError> {
    let products = sqlx::query_as("SELECT * FROM products WHERE source = $1 ORDER BY id")
        .bind(source)
        .fetch_all(conn)
        .await?;
    Ok(products)
}

pub async fn fetch_product_ids_for_source(
    source: SourceTag,
    conn: &mut SqliteConnection,
) -> Result<HashSet<ProductId>, StoreError> {
    let ids: Vec<ProductId> =
        sqlx::query_scalar("SELECT id FROM products WHERE source = $1").bind(source).fetch_all(conn).await?;
    Ok(ids.into_iter().collect())
}

pub async fn fetch_all_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, StoreError> {
    let products = sqlx::query_as("SELECT * FROM products ORDER BY id").fetch_all(conn).await?;
    Ok(products)
}
