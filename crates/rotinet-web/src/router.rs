//! Route table for the views, the JSON API and static files.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{
    api::{api_graph, api_locus, api_node},
    details::node_details,
    igv::genome_browser,
    network::network_page,
};
use crate::link::{DETAILS_PATH, GENOME_BROWSER_PATH, NETWORK_PATH};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route(NETWORK_PATH,        get(network_page))
        .route(DETAILS_PATH,        get(node_details))
        .route(GENOME_BROWSER_PATH, get(genome_browser))

        // API endpoints
        .route("/api/graph",      get(api_graph))
        .route("/api/nodes/{id}", get(api_node))
        .route("/api/locus",      get(api_locus))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
