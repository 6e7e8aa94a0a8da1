//! rotinet-table: Tab-separated tables backing the network and genome views.
//!
//! - [`DataTable`]: the edge list (`source`, `target`, opaque attributes)
//! - [`GeneTable`]: locus-tag → genomic coordinate lookup
//! - [`TableCache`]: load-once holder shared by every view

pub mod cache;
pub mod edges;
pub mod locus;
mod tsv;

pub use cache::TableCache;
pub use edges::{DataTable, EdgeRecord};
pub use locus::{GeneRecord, GeneTable, LocusSources, LocusState};
