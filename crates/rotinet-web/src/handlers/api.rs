//! JSON API over the same data as the views.

use axum::extract::{Path, State};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use axum_extra::extract::Query;
use rotinet_common::RotinetError;
use serde_json::json;

use crate::error::ApiError;
use crate::handlers::network::{selected_nodes, session_graph};
use crate::link::decode_node;
use crate::query::{NetworkQuery, NodeQuery};
use crate::session::Session;
use crate::state::SharedState;

/// `GET /api/graph`: the session's graph, same parameters as `/`.
pub async fn api_graph(
    State(state): State<SharedState>,
    session: Session,
    Query(params): Query<NetworkQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let table = state.edges.get()?;
    let selected = selected_nodes(&params);
    let rendered = session_graph(&state, &session, &table, &params, &selected).await?;
    Ok((AppendHeaders(session.set_cookie()), Json(rendered.graph)))
}

/// `GET /api/nodes/{id}`: the node's first row plus its view links.
pub async fn api_node(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let table = state.edges.get()?;
    let record = table
        .find(&id)
        .ok_or_else(|| RotinetError::UnknownNode(id.clone()))?;
    let fields: Vec<_> = table.fields(record).collect();

    Ok(Json(json!({
        "node": id,
        "fields": fields,
        "links": state.linker.links(&id),
    })))
}

/// `GET /api/locus?node=`: resolved locus, `null` when unknown.
pub async fn api_locus(
    State(state): State<SharedState>,
    Query(params): Query<NodeQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let node = decode_node(&params.node)?;
    let genes = state.genes.get()?;
    let locus = genes.resolve(&node);
    Ok(Json(json!({ "node": node, "locus": locus })))
}
