//! Request handler definitions.
//!
//! Handlers stay thin: deserialize, call into the engine or the sync runner, serialize. Anything longer belongs in
//! the modules those calls land in.
use actix_web::{get, http::header::ContentType, post, web, HttpResponse, Responder};
use bindery_engine::{db_types::Product, AnalyticsApi, SqliteDatabase, SyncApi};
use log::*;

use crate::{
    data_objects::{BookReport, JsonResponse, NewBookEntry},
    errors::ServerError,
    sync::SyncRunner,
};

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().content_type(ContentType::plaintext()).body("👍️\n")
}

/// Route handler for the combined book report: every product, order and monthly aggregate in one response.
#[get("/api/books")]
pub async fn book_report(
    api: web::Data<SyncApi<SqliteDatabase>>,
    analytics: web::Data<AnalyticsApi<SqliteDatabase>>,
) -> Result<HttpResponse, ServerError> {
    let books = api.all_products().await?;
    let orders = api.all_orders().await?;
    let analytics = analytics.all_months().await?;
    debug!("💻️ Serving the book report. {} books, {} orders, {} months", books.len(), orders.len(), analytics.len());
    Ok(HttpResponse::Ok().json(BookReport { books, orders, analytics }))
}

/// Route handler for manual catalog entries. The ISBN is the natural id, so re-posting a book overwrites it.
#[post("/api/books")]
pub async fn add_book(
    api: web::Data<SyncApi<SqliteDatabase>>,
    body: web::Json<NewBookEntry>,
) -> Result<HttpResponse, ServerError> {
    let entry = body.into_inner();
    if entry.isbn.trim().is_empty() {
        return Err(ServerError::InvalidRequestBody("The ISBN may not be empty".to_string()));
    }
    let product = Product::from(entry);
    api.save_product(&product).await?;
    info!("💻️ Manual catalog entry {} ({}) saved", product.id, product.name);
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Book {} saved", product.id))))
}

/// Route handler for the device-order view: a live marketplace fetch filtered against the stored device catalog.
#[get("/api/kindle/orders")]
pub async fn kindle_orders(runner: web::Data<SyncRunner>) -> Result<HttpResponse, ServerError> {
    let orders = runner.kindle_orders().await?;
    debug!("💻️ Serving {} device orders", orders.len());
    Ok(HttpResponse::Ok().json(orders))
}

/// Route handler for the device-order sales totals.
#[get("/api/kindle/analytics")]
pub async fn kindle_analytics(runner: web::Data<SyncRunner>) -> Result<HttpResponse, ServerError> {
    let analytics = runner.kindle_analytics().await?;
    Ok(HttpResponse::Ok().json(analytics))
}

/// Route handler for the manual pipeline trigger. Responds 409 when a pass is already in flight.
#[post("/api/sync")]
pub async fn trigger_sync(runner: web::Data<SyncRunner>) -> Result<HttpResponse, ServerError> {
    info!("💻️ Reconciliation pass triggered over HTTP");
    let summary = runner.run_once().await?;
    Ok(HttpResponse::Ok().json(summary))
}
