use dotenvy::dotenv;
use std::env;

use wayv::config::AppConfig;
use wayv::database;
use wayv::services::participants_service;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let Some(path) = env::args().nth(1).or_else(|| env::var("IMPORT_FILE").ok()) else {
        eprintln!("usage: import_participants <spreadsheet> (or set IMPORT_FILE)");
        std::process::exit(2);
    };

    let config = AppConfig::from_env();

    let bytes = match tokio::fs::read(&path).await {
        Ok(b) => b,
        Err(e) => {
            eprintln!("could not read {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let pool = match database::connect(&config.database_url, config.max_connections).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("could not open {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };

    match participants_service::ingest_spreadsheet(&pool, bytes).await {
        Ok(inserted) => {
            println!("import: file={}, inserted={}", path, inserted);
        }
        Err(e) => {
            eprintln!("import failed: {}", e);
            std::process::exit(1);
        }
    }
}
