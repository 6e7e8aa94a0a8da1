//! rotinet web server
//!
//! Run with: cargo run -p rotinet-web

use rotinet_config::Config;
use rotinet_web::assets::spawn_asset_server;
use rotinet_web::router::build_router;
use rotinet_web::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("Starting rotinet web server...");

    let config = Config::load()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let assets = spawn_asset_server(&config.genome.data_dir).await?;
    let state = AppState::new(config, assets.base_url());
    state.warm();
    info!("Cross-view links use {}", state.linker.base());

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
