//! Standalone reconciliation runner: one pass immediately, then one every 10 minutes (configurable), with no HTTP
//! listener. Useful on hosts where the dashboard runs elsewhere.
use std::time::Duration;

use bindery_server::{config::ServerConfig, server::prepare_database, sync::SyncRunner};
use dotenvy::dotenv;
use log::*;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let config = ServerConfig::from_env_or_default();
    let db = match prepare_database(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Could not open the bindery database. {e}");
            std::process::exit(1);
        },
    };
    let runner = match SyncRunner::new(db, &config) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("Could not initialize the sync runner. {e}");
            std::process::exit(1);
        },
    };
    let interval = Duration::from_secs(config.sync.standalone_interval_secs);
    info!("🔁️ Standalone reconciliation runner started. A pass runs now and then every {}s.", interval.as_secs());
    loop {
        match runner.run_once().await {
            Ok(summary) => info!("🔁️ Pass complete. {summary}"),
            Err(e) => error!("🔁️ Pass failed. {e}"),
        }
        tokio::time::sleep(interval).await;
    }
}
