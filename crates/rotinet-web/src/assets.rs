//! Static asset server for igv.js.
//!
//! igv.js fetches the reference FASTA, its index and the tabix-indexed
//! annotation cross-origin, so the genome data directory is served by a
//! second server with permissive CORS on an ephemeral loopback port.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const DEFAULT_MOUNT: &str = "data";

/// A running asset server.
#[derive(Debug)]
pub struct AssetServer {
    pub addr: SocketAddr,
    pub mount: String,
    pub handle: JoinHandle<()>,
}

impl AssetServer {
    /// `http://localhost:<port>/<mount>`, the prefix igv.js URLs are built on.
    pub fn base_url(&self) -> String {
        format!("http://localhost:{}{}", self.addr.port(), self.mount)
    }
}

/// URL prefix for `data_dir`: `/` followed by its last path component.
pub fn mount_path(data_dir: &Path) -> String {
    let name = data_dir
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_MOUNT);
    format!("/{name}")
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([HeaderName::from_static("x-requested-with"), CONTENT_TYPE])
}

pub fn asset_router(data_dir: &Path) -> Router {
    Router::new()
        .nest_service(&mount_path(data_dir), ServeDir::new(data_dir))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Bind `127.0.0.1:0` and serve `data_dir` on a background task.
pub async fn spawn_asset_server(data_dir: &Path) -> anyhow::Result<AssetServer> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    let mount = mount_path(data_dir);
    let app = asset_router(data_dir);

    let handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!("Asset server stopped: {err}");
        }
    });

    info!("Asset server serving {} on http://{}{}/", data_dir.display(), addr, mount);
    Ok(AssetServer { addr, mount, handle })
}
