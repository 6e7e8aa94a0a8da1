//! Network view: sidebar controls, star graph, selected-node info panel.

use std::collections::BTreeSet;

use axum::extract::State;
use axum_extra::extract::Query;
use axum::response::{AppendHeaders, Html, IntoResponse};
use minijinja::context;
use rotinet_graph::view_state::{CONNECTION_WIDTH_RANGE, FONT_SIZE_RANGE, IMAGE_SIZE_RANGE};
use rotinet_graph::{ControlInput, GraphBuilder, GraphModel, GraphStyle};
use rotinet_table::edges::SOURCE_COLUMN;
use rotinet_table::DataTable;
use serde::Serialize;
use tracing::debug;

use crate::error::ViewError;
use crate::link::{NodeLinks, SelectionLinker};
use crate::query::{number, NetworkQuery};
use crate::session::Session;
use crate::state::SharedState;
use crate::templates;

#[derive(Debug, Serialize)]
struct Choice<'a> {
    value: &'a str,
    checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoCard {
    pub id: String,
    pub links: NodeLinks,
    pub properties: Vec<Property>,
}

#[derive(Debug, Serialize)]
struct Ranges {
    size: [u32; 2],
    font_size: [u32; 2],
    width: [u32; 2],
}

/// One graph render for the caller's session.
pub(crate) struct SessionGraph {
    pub graph: GraphModel,
    pub style: GraphStyle,
    pub selected_classes: BTreeSet<String>,
    pub show_info: bool,
}

pub async fn network_page(
    State(state): State<SharedState>,
    session: Session,
    Query(params): Query<NetworkQuery>,
) -> Result<impl IntoResponse, ViewError> {
    let table = state.edges.get()?;
    let selected = selected_nodes(&params);
    let rendered = session_graph(&state, &session, &table, &params, &selected).await?;

    let classes: Vec<Choice> = table
        .classes()
        .into_iter()
        .map(|c| Choice { value: c, checked: rendered.selected_classes.contains(c) })
        .collect();
    let nodes: Vec<Choice> = table
        .sources()
        .into_iter()
        .map(|s| Choice { value: s, checked: selected.iter().any(|n| n.as_str() == s) })
        .collect();
    let cards = if rendered.show_info {
        info_cards(&table, &state.linker, &selected)
    } else {
        Vec::new()
    };

    let html = templates::render(
        "network.html",
        context! {
            title => "Interactive Network",
            graph => &rendered.graph,
            style => &rendered.style,
            ranges => Ranges {
                size: [*IMAGE_SIZE_RANGE.start(), *IMAGE_SIZE_RANGE.end()],
                font_size: [*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end()],
                width: [*CONNECTION_WIDTH_RANGE.start(), *CONNECTION_WIDTH_RANGE.end()],
            },
            has_classes => table.has_class_column(),
            classes => classes,
            nodes => nodes,
            show_info => rendered.show_info,
            has_selection => !selected.is_empty(),
            cards => cards,
        },
    )?;

    Ok((AppendHeaders(session.set_cookie()), Html(html)))
}

/// Fold the request's controls into the session and build its graph.
pub(crate) async fn session_graph(
    state: &SharedState,
    session: &Session,
    table: &DataTable,
    params: &NetworkQuery,
    selected: &[String],
) -> Result<SessionGraph, ViewError> {
    let highlighted: BTreeSet<String> = selected.iter().cloned().collect();
    let mut view = session.state.lock().await;
    view.apply(&controls_from_query(params));

    let graph = GraphBuilder::new(table, &state.hub_image).build_for(&mut view, &highlighted)?;
    debug!(
        session = %session.id,
        nodes = graph.nodes.len(),
        classes = view.selected_classes.len(),
        "rendered network"
    );

    Ok(SessionGraph {
        graph,
        style: view.style.clone(),
        selected_classes: view.selected_classes.clone(),
        show_info: view.show_info,
    })
}

/// Sidebar form → control input. Class checkboxes and the info toggle only
/// count on a submitted form, since unchecked boxes are simply absent.
pub fn controls_from_query(params: &NetworkQuery) -> ControlInput {
    let submitted = params.submitted();
    ControlInput {
        image_size: number(params.size.as_deref()),
        font_size: number(params.font_size.as_deref()),
        connection_width: number(params.width.as_deref()),
        bg_color: params.bg.clone(),
        classes: submitted.then(|| params.class.clone()),
        show_info: submitted.then(|| params.info_checked()),
    }
}

/// `nodes` values in request order, duplicates and empties dropped.
pub fn selected_nodes(params: &NetworkQuery) -> Vec<String> {
    let mut seen = BTreeSet::new();
    params
        .nodes
        .iter()
        .filter(|n| !n.is_empty() && seen.insert(n.as_str()))
        .cloned()
        .collect()
}

/// Info panel entries for the selected nodes present in the table.
pub fn info_cards(table: &DataTable, linker: &SelectionLinker, selected: &[String]) -> Vec<InfoCard> {
    selected
        .iter()
        .filter_map(|id| table.find(id).map(|row| (id, row)))
        .map(|(id, row)| InfoCard {
            id: id.clone(),
            links: linker.links(id),
            properties: table
                .fields(row)
                .filter(|f| f.column != SOURCE_COLUMN)
                .map(|f| Property { name: capitalize(f.column), value: f.value.to_string() })
                .collect(),
        })
        .collect()
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
