//! Cross-view node handoff.
//!
//! The network view produces `?node=<id>` URLs and the detail and
//! genome-browser views consume them; both sides use the constants here.

use axum::http::Uri;
use axum_extra::extract::Query;
use rotinet_common::{Result, RotinetError};
use serde::Serialize;

use crate::query::NodeQuery;

pub const NODE_PARAM: &str = "node";

pub const NETWORK_PATH: &str = "/";
pub const DETAILS_PATH: &str = "/Node_Details";
pub const GENOME_BROWSER_PATH: &str = "/IGV_Browser";

/// Search engines offered on the detail view, each followed by the encoded id.
pub const EXTERNAL_SEARCHES: [(&str, &str); 4] = [
    ("Google", "https://www.google.com/search?q="),
    ("NCBI", "https://www.ncbi.nlm.nih.gov/search/?term="),
    ("UniProt", "https://www.uniprot.org/uniprotkb?query="),
    ("PubMed", "https://pubmed.ncbi.nlm.nih.gov/?term="),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeLinks {
    pub details: String,
    pub genome_browser: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub name: &'static str,
    pub url: String,
}

/// Builds fully-qualified view URLs.
#[derive(Debug, Clone)]
pub struct SelectionLinker {
    base: String,
}

impl SelectionLinker {
    /// `base` is scheme + authority, e.g. `http://localhost:8501`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { base: base.trim_end_matches('/').to_string() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn links(&self, id: &str) -> NodeLinks {
        NodeLinks {
            details: self.url(DETAILS_PATH, id),
            genome_browser: self.url(GENOME_BROWSER_PATH, id),
        }
    }

    fn url(&self, path: &str, id: &str) -> String {
        format!("{}{}?{}={}", self.base, path, NODE_PARAM, encode_node(id))
    }
}

pub fn encode_node(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// The selected node of a consuming view, given every `node` value in
/// request order. A repeated key yields its first value; absent or empty is
/// [`RotinetError::NoQueryParameter`].
pub fn decode_node(values: &[String]) -> Result<String> {
    values
        .first()
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or(RotinetError::NoQueryParameter(NODE_PARAM))
}

/// [`decode_node`] applied to the query part of a full URL.
pub fn decode_url(url: &str) -> Result<String> {
    let missing = || RotinetError::NoQueryParameter(NODE_PARAM);
    let without_fragment = url.split('#').next().unwrap_or_default();
    let uri: Uri = without_fragment.parse().map_err(|_| missing())?;
    let Query(query) = Query::<NodeQuery>::try_from_uri(&uri).map_err(|_| missing())?;
    decode_node(&query.node)
}

pub fn external_links(id: &str) -> Vec<ExternalLink> {
    let encoded = encode_node(id);
    EXTERNAL_SEARCHES
        .iter()
        .map(|&(name, prefix)| ExternalLink { name, url: format!("{prefix}{encoded}") })
        .collect()
}
