//! HTTP surface tests, driven through actix's in-process test service.
mod support;

use actix_web::{http::StatusCode, test, web, App};
use bindery_engine::{AnalyticsApi, SyncApi};
use bindery_server::{
    routes::{add_book, book_report, health, trigger_sync},
    sync::SyncRunner,
};
use serde_json::{json, Value};

use support::{new_db, small_world_urls};

#[actix_web::test]
async fn health_answers() {
    let app = test::init_service(App::new().service(health)).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn manual_entries_round_trip_through_the_book_report() {
    let (db, _url) = new_db().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(SyncApi::new(db.clone())))
            .app_data(web::Data::new(AnalyticsApi::new(db.clone())))
            .service(book_report)
            .service(add_book),
    )
    .await;

    let entry = json!({ "title": "Roadwork", "author": "R. Bachman", "isbn": "978-81-0000000-7", "price": "249.00" });
    let req = test::TestRequest::post().uri("/api/books").set_json(&entry).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // Re-posting the same ISBN overwrites the entry instead of duplicating it.
    let revised = json!({ "title": "Roadwork (Revised)", "author": "R. Bachman", "isbn": "978-81-0000000-7", "price": "299.00" });
    let req = test::TestRequest::post().uri("/api/books").set_json(&revised).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/books").to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;
    let books = report["books"].as_array().expect("books array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Roadwork (Revised)");
    assert_eq!(books[0]["source"], "manual");
    assert_eq!(books[0]["price"], "299.00");
    assert!(report["orders"].as_array().expect("orders array").is_empty());
    assert!(report["analytics"].as_array().expect("analytics array").is_empty());
}

#[actix_web::test]
async fn an_entry_without_an_isbn_is_rejected() {
    let (db, _url) = new_db().await;
    let app = test::init_service(
        App::new().app_data(web::Data::new(SyncApi::new(db.clone()))).service(add_book),
    )
    .await;
    let entry = json!({ "title": "Roadwork", "author": "R. Bachman", "isbn": "   ", "price": "249.00" });
    let req = test::TestRequest::post().uri("/api/books").set_json(&entry).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "The request body could not be used");
    assert!(body["error"].as_str().expect("error detail").contains("ISBN"));
}

#[actix_web::test]
async fn the_sync_trigger_reports_the_pass_summary() {
    let (woo_url, sp_url) = small_world_urls().await;
    let (db, db_url) = new_db().await;
    let config = support::test_config(&woo_url, &sp_url, &db_url);
    let runner = SyncRunner::new(db.clone(), &config).expect("Error creating the sync runner");
    let app = test::init_service(App::new().app_data(web::Data::new(runner)).service(trigger_sync)).await;

    let req = test::TestRequest::post().uri("/api/sync").to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(summary["woo_products"], 2);
    assert_eq!(summary["woo_orders"], 3);
    assert_eq!(summary["amazon_orders"], 2);
    assert_eq!(summary["months"], 2);
}
