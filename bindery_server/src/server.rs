use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use bindery_engine::{AnalyticsApi, SqliteDatabase, SyncApi};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{add_book, book_report, health, kindle_analytics, kindle_orders, trigger_sync},
    sync::SyncRunner,
    sync_worker::start_sync_worker,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = prepare_database(&config.database_url).await?;
    let runner = SyncRunner::new(db.clone(), &config)?;
    start_sync_worker(runner.clone());
    let srv = create_server_instance(config, db, runner)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Creates the database file if needed, opens the pool, and brings the schema up to date.
pub async fn prepare_database(url: &str) -> Result<SqliteDatabase, ServerError> {
    SqliteDatabase::create_database_if_missing(url).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let db = SqliteDatabase::new_with_url(url, 25).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🗃️ Database ready at {url}");
    Ok(db)
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    runner: SyncRunner,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let sync_api = SyncApi::new(db.clone());
        let analytics_api = AnalyticsApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("bnd::access_log"))
            .app_data(web::Data::new(sync_api))
            .app_data(web::Data::new(analytics_api))
            .app_data(web::Data::new(runner.clone()))
            .service(health)
            .service(book_report)
            .service(add_book)
            .service(kindle_orders)
            .service(kindle_analytics)
            .service(trigger_sync)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
