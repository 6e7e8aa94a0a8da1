//! Node detail view.

use axum::extract::State;
use axum_extra::extract::Query;
use axum::response::Html;
use minijinja::context;
use rotinet_common::RotinetError;
use rotinet_table::edges::{CLASS_COLUMN, DESCRIPTION_COLUMN};
use serde::Serialize;

use crate::error::ViewError;
use crate::link::{decode_node, external_links, NETWORK_PATH};
use crate::query::NodeQuery;
use crate::state::SharedState;
use crate::templates;

/// Height of the embedded genome browser frame.
const EMBED_HEIGHT: u32 = 600;

#[derive(Debug, Serialize)]
struct Overview<'a> {
    node_id: &'a str,
    target: &'a str,
    class: Option<&'a str>,
    description: Option<&'a str>,
}

pub async fn node_details(
    State(state): State<SharedState>,
    Query(params): Query<NodeQuery>,
) -> Result<Html<String>, ViewError> {
    let node = decode_node(&params.node)?;
    let table = state.edges.get()?;
    let record = table
        .find(&node)
        .ok_or_else(|| RotinetError::UnknownNode(node.clone()))?;

    let overview = Overview {
        node_id: &record.source,
        target: &record.target,
        class: table.value(record, CLASS_COLUMN),
        description: table.value(record, DESCRIPTION_COLUMN),
    };
    let properties: Vec<_> = table.fields(record).collect();

    let html = templates::render(
        "node_details.html",
        context! {
            title => format!("{node} | Node Details"),
            node => &node,
            overview => overview,
            properties => properties,
            links => state.linker.links(&node),
            embed_height => EMBED_HEIGHT,
            external => external_links(&node),
            back_url => NETWORK_PATH,
        },
    )?;
    Ok(Html(html))
}
