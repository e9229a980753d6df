//! In-process mock upstreams for the connector and pipeline tests.
//!
//! Each mock is a real actix-web server on an ephemeral port, so the connectors exercise their actual reqwest
//! clients end to end. Request counters are plain atomics shared with the test body.
#![allow(dead_code)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use actix_web::{web, App, HttpResponse, HttpServer};
use bindery_common::Secret;
use bindery_engine::{
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    SqliteDatabase,
};
use bindery_server::config::ServerConfig;
use serde::Deserialize;
use serde_json::{json, Value};
use spapi_tools::SpApiConfig;
use woo_tools::WooConfig;

pub async fn new_db() -> (SqliteDatabase, String) {
    let url = random_db_path();
    prepare_test_env(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating test database");
    (db, url)
}

pub fn test_config(woo_url: &str, sp_url: &str, database_url: &str) -> ServerConfig {
    ServerConfig {
        database_url: database_url.to_string(),
        woo_config: WooConfig {
            base_url: woo_url.to_string(),
            consumer_key: Secret::new("ck_test".to_string()),
            consumer_secret: Secret::new("cs_test".to_string()),
        },
        spapi_config: SpApiConfig {
            endpoint: sp_url.to_string(),
            auth_url: format!("{sp_url}/auth/o2/token"),
            marketplace_id: "A21TJRUUN4KGV".to_string(),
            refresh_token: Secret::new("Atzr|test".to_string()),
            client_id: Secret::new("client-id-test".to_string()),
            client_secret: Secret::new("client-secret-test".to_string()),
        },
        ..ServerConfig::default()
    }
}

//--------------------------------------  Storefront mock    ---------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: usize,
    per_page: usize,
}

#[derive(Clone)]
pub struct WooMockState {
    products: Arc<Vec<Value>>,
    orders: Arc<Vec<Value>>,
    pub product_hits: Arc<AtomicUsize>,
    pub order_hits: Arc<AtomicUsize>,
}

impl WooMockState {
    pub fn new(products: Vec<Value>, orders: Vec<Value>) -> Self {
        Self {
            products: Arc::new(products),
            orders: Arc::new(orders),
            product_hits: Arc::new(AtomicUsize::new(0)),
            order_hits: Arc::new(AtomicUsize::new(0)),
        }
    }
}

pub fn woo_product_fixture(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("Book {id}"),
        "price": "349.00",
        "description": "<p>A story.</p>",
        "sku": format!("978-81-{id:07}"),
        "stock_quantity": 5,
        "images": [{"src": format!("https://shop.example.com/img/{id}.jpg")}],
        "categories": [{"id": 15, "name": "Fiction"}],
        "date_created": "2024-01-05T09:30:00",
        "date_modified": "2024-01-05T09:30:00"
    })
}

pub fn woo_order_fixture(id: u64, total: &str, date_created: &str, product_id: u64) -> Value {
    json!({
        "id": id,
        "status": "completed",
        "total": total,
        "currency": "INR",
        "date_created": date_created,
        "date_modified": date_created,
        "customer_id": 8,
        "billing": {"city": "Pune"},
        "shipping": {},
        "line_items": [{"product_id": product_id, "name": format!("Book {product_id}"), "quantity": 1, "price": 349.0}]
    })
}

fn page_of(items: &[Value], page: usize, per_page: usize) -> Vec<Value> {
    items.iter().skip(page.saturating_sub(1) * per_page).take(per_page).cloned().collect()
}

async fn woo_products(state: web::Data<WooMockState>, query: web::Query<PageQuery>) -> HttpResponse {
    state.product_hits.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().json(page_of(&state.products, query.page, query.per_page))
}

async fn woo_orders(state: web::Data<WooMockState>, query: web::Query<PageQuery>) -> HttpResponse {
    state.order_hits.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().json(page_of(&state.orders, query.page, query.per_page))
}

pub async fn spawn_woo_mock(state: WooMockState) -> String {
    let data = web::Data::new(state);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/wp-json/wc/v3/products", web::get().to(woo_products))
            .route("/wp-json/wc/v3/orders", web::get().to(woo_orders))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("Error binding the mock storefront");
    let addr = server.addrs()[0];
    tokio::spawn(server.run());
    format!("http://{addr}")
}

//--------------------------------------  Marketplace mock   ---------------------------------------------------------
// Serves a fixed world: two orders in the trailing window (one touching the device catalog), catalog details and
// offers for both referenced ASINs, and a one-item device catalog search result.

pub const KINDLE_ASIN: &str = "B0KINDLE01";
pub const BOOK_ASIN: &str = "B0BOOK0001";
pub const KINDLE_ORDER_ID: &str = "901-0000001-0000001";
pub const BOOK_ORDER_ID: &str = "901-0000001-0000002";

async fn lwa_token() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "access_token": "test-token", "token_type": "bearer", "expires_in": 3600 }))
}

async fn sp_orders() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "payload": {
            "Orders": [
                {
                    "AmazonOrderId": KINDLE_ORDER_ID,
                    "OrderStatus": "Shipped",
                    "OrderTotal": {"Amount": "12999.00", "CurrencyCode": "INR"},
                    "PurchaseDate": "2024-06-01T00:00:00Z",
                    "LastUpdateDate": "2024-06-01T10:00:00Z"
                },
                {
                    "AmazonOrderId": BOOK_ORDER_ID,
                    "OrderStatus": "Shipped",
                    "OrderTotal": {"Amount": "499.00", "CurrencyCode": "INR"},
                    "PurchaseDate": "2024-06-02T00:00:00Z",
                    "LastUpdateDate": "2024-06-02T10:00:00Z"
                }
            ]
        }
    }))
}

async fn sp_order_items(path: web::Path<String>) -> HttpResponse {
    let order_id = path.into_inner();
    let asin = if order_id == KINDLE_ORDER_ID { KINDLE_ASIN } else { BOOK_ASIN };
    HttpResponse::Ok().json(json!({
        "payload": {
            "AmazonOrderId": order_id,
            "OrderItems": [{
                "ASIN": asin,
                "OrderItemId": "68500914331",
                "Title": format!("Item {asin}"),
                "QuantityOrdered": 1,
                "ItemPrice": {"Amount": "499.00", "CurrencyCode": "INR"}
            }]
        }
    }))
}

async fn sp_catalog_search() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "numberOfResults": 1,
        "items": [{
            "asin": KINDLE_ASIN,
            "summaries": [{"marketplaceId": "A21TJRUUN4KGV", "itemName": "Kindle Paperwhite"}]
        }]
    }))
}

async fn sp_catalog_item(path: web::Path<String>) -> HttpResponse {
    let asin = path.into_inner();
    HttpResponse::Ok().json(json!({
        "asin": asin,
        "summaries": [{"marketplaceId": "A21TJRUUN4KGV", "itemName": format!("Item {asin}")}]
    }))
}

async fn sp_offers(path: web::Path<String>) -> HttpResponse {
    let asin = path.into_inner();
    let amount = if asin == KINDLE_ASIN { "12999.00" } else { "499.00" };
    HttpResponse::Ok().json(json!({
        "payload": { "Offers": [{"ListingPrice": {"Amount": amount, "CurrencyCode": "INR"}}] }
    }))
}

/// A small but complete storefront: two products and three orders spanning two calendar months.
pub fn small_woo_world() -> WooMockState {
    WooMockState::new(
        vec![woo_product_fixture(1), woo_product_fixture(2)],
        vec![
            woo_order_fixture(101, "10.00", "2024-01-15T10:00:00", 1),
            woo_order_fixture(102, "20.00", "2024-01-20T11:00:00", 1),
            woo_order_fixture(103, "5.00", "2024-02-03T12:00:00", 2),
        ],
    )
}

/// Spawns the small storefront world and the marketplace mock, returning their base urls.
pub async fn small_world_urls() -> (String, String) {
    (spawn_woo_mock(small_woo_world()).await, spawn_sp_mock().await)
}

pub async fn spawn_sp_mock() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .route("/auth/o2/token", web::post().to(lwa_token))
            .route("/orders/v0/orders", web::get().to(sp_orders))
            .route("/orders/v0/orders/{order_id}/orderItems", web::get().to(sp_order_items))
            .route("/catalog/2022-04-01/items", web::get().to(sp_catalog_search))
            .route("/catalog/2022-04-01/items/{asin}", web::get().to(sp_catalog_item))
            .route("/products/pricing/v0/items/{asin}/offers", web::get().to(sp_offers))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("Error binding the mock marketplace");
    let addr = server.addrs()[0];
    tokio::spawn(server.run());
    format!("http://{addr}")
}
