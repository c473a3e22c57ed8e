use dotenvy::dotenv;
use std::net::SocketAddr;

use wayv::config::AppConfig;
use wayv::database;
use wayv::web;

#[tokio::main]
async fn main() {
    // .env is optional; real env vars win
    dotenv().ok();

    // 1. Start logging (RUST_LOG)
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    // 2. Database. One pool for the whole process; the file and the
    //    participants table are created on first start.
    println!("Conectando ao banco de dados: {}", config.database_url);
    let pool = database::connect(&config.database_url, config.max_connections)
        .await
        .expect("could not open participants database");

    // 3. Routes + layers
    let app = web::build_router(pool, config.max_upload_bytes);

    // 4. Start the server (with fallback port)
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("could not parse HOST/PORT");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback_port = config.port.saturating_add(1);
            eprintln!(
                "⚠️  Não foi possível escutar em {}: {}. Tentando {}:{}",
                addr, e, config.host, fallback_port
            );
            let fallback: SocketAddr = format!("{}:{}", config.host, fallback_port)
                .parse()
                .expect("could not parse fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("could not bind fallback port")
        }
    };

    let bound_addr = listener
        .local_addr()
        .expect("listener has no local address");
    tracing::info!(%bound_addr, "server listening");
    println!("🚀 Servidor rodando em http://{}", bound_addr);
    println!("📄 Descrição da API em http://{}/openapi.json", bound_addr);

    axum::serve(listener, app).await.expect("server error");
}
