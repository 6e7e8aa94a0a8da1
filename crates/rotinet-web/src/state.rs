//! Shared application state for the web server.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rotinet_config::Config;
use rotinet_table::{DataTable, GeneTable, TableCache};
use tracing::{info, warn};

use crate::hub_image::load_hub_image;
use crate::link::SelectionLinker;
use crate::session::SessionStore;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    pub edges: TableCache<DataTable>,
    pub genes: TableCache<GeneTable>,
    pub sessions: SessionStore,
    pub linker: SelectionLinker,
    /// Data URI of the hub node image.
    pub hub_image: String,
    /// URL of the genome data directory on the asset server, no trailing slash.
    pub asset_base: String,
}

impl AppState {
    pub fn new(config: Config, asset_base: impl Into<String>) -> Self {
        let locus_tag_column = config.genome.locus_tag_column.clone();
        let asset_base = asset_base.into();
        Self {
            edges: TableCache::new(&config.data.edge_table, |p: &Path| DataTable::load(p)),
            genes: TableCache::new(config.genome.gene_table_path(), move |p: &Path| {
                GeneTable::load_or_empty(p, &locus_tag_column)
            }),
            sessions: SessionStore::with_limits(
                Duration::from_secs(config.server.session_ttl_secs),
                config.server.max_sessions,
            ),
            linker: SelectionLinker::new(config.base_url()),
            hub_image: load_hub_image(&config.data.hub_image),
            asset_base: asset_base.trim_end_matches('/').to_string(),
            config,
        }
    }

    /// URL of `file` inside the genome data directory.
    pub fn asset_url(&self, file: &str) -> String {
        format!("{}/{}", self.asset_base, file)
    }

    /// Load both tables up front so startup logs report data problems.
    /// Failures stay cached and are rendered by the views.
    pub fn warm(&self) {
        match self.edges.get() {
            Ok(table) => info!("Edge table ready: {} rows", table.len()),
            Err(err) => warn!("Edge table unavailable: {err}"),
        }
        match self.genes.get() {
            Ok(genes) => info!("Gene table ready: {} loci", genes.len()),
            Err(err) => warn!("Gene table unavailable: {err}"),
        }
    }
}

pub type SharedState = Arc<AppState>;
