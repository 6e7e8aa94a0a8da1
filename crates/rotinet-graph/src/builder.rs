//! Table + layout + session state → [`GraphModel`].

use std::collections::{BTreeSet, HashSet};

use rotinet_common::{Result, RotinetError};
use rotinet_table::{DataTable, EdgeRecord};
use tracing::debug;

use crate::color::{font_color, ColorMap, BLACK, WHITE};
use crate::hub::select_hub;
use crate::layout::star_layout;
use crate::model::*;
use crate::view_state::{GraphStyle, ViewState};

pub struct GraphBuilder<'a> {
    table: &'a DataTable,
    hub_image: &'a str,
}

impl<'a> GraphBuilder<'a> {
    /// `hub_image` is any URI vis-network can load (a data URI in practice).
    pub fn new(table: &'a DataTable, hub_image: &'a str) -> Self {
        Self { table, hub_image }
    }

    /// Build with the session's filter, style and color map.
    pub fn build_for(&self, state: &mut ViewState, highlighted: &BTreeSet<String>) -> Result<GraphModel> {
        self.build(&state.selected_classes, highlighted, &state.style, &mut state.colors)
    }

    /// Star graph of every source row passing `class_filter` (empty = no
    /// filtering). New sources get a color in `colors`; existing entries are
    /// never touched.
    pub fn build(
        &self,
        class_filter: &BTreeSet<String>,
        highlighted: &BTreeSet<String>,
        style: &GraphStyle,
        colors: &mut ColorMap,
    ) -> Result<GraphModel> {
        let hub_id = select_hub(self.table.targets()).ok_or(RotinetError::EmptyTable)?;

        let sources = self.filtered_sources(class_filter, hub_id);
        let positions = star_layout(&sources.iter().map(|r| r.source.as_str()).collect::<Vec<_>>());

        let mut nodes = Vec::with_capacity(sources.len() + 1);
        let mut edges = Vec::with_capacity(sources.len());

        nodes.push(VisNode {
            id: hub_id.to_string(),
            label: String::new(),
            shape: HUB_SHAPE,
            image: Some(self.hub_image.to_string()),
            size: style.image_size,
            color: NodeColor::Split { background: WHITE.to_string(), border: WHITE.to_string() },
            font: Font { size: style.font_size, color: BLACK.to_string() },
            border_width: None,
            title: None,
            x: None,
            y: None,
            physics: false,
        });

        for (row, position) in sources.iter().zip(positions) {
            let id = row.source.as_str();
            let color = colors.assign(id).to_string();
            let is_highlighted = highlighted.contains(id);

            nodes.push(VisNode {
                id: id.to_string(),
                label: id.to_string(),
                shape: SOURCE_SHAPE,
                image: None,
                size: style.image_size,
                font: Font { size: style.font_size, color: font_color(&color).to_string() },
                color: NodeColor::Solid(color),
                border_width: Some(if is_highlighted { 4 } else { 2 }),
                title: Some(self.tooltip(row)),
                x: Some(position.x),
                y: Some(position.y),
                physics: false,
            });

            edges.push(VisEdge {
                from: id.to_string(),
                to: hub_id.to_string(),
                color: if is_highlighted { HIGHLIGHT_EDGE_COLOR } else { BASE_EDGE_COLOR }.to_string(),
                width: if is_highlighted { style.connection_width * 2 } else { style.connection_width },
            });
        }

        debug!(
            hub = hub_id,
            sources = sources.len(),
            highlighted = highlighted.len(),
            "built star graph"
        );

        Ok(GraphModel {
            nodes,
            edges,
            options: VisOptions::new(style.font_size, style.connection_width),
            background: style.bg_color.clone(),
        })
    }

    /// First passing row of each distinct source, in encounter order. A source
    /// equal to the hub id is already drawn as the hub and is left out.
    fn filtered_sources(&self, class_filter: &BTreeSet<String>, hub_id: &str) -> Vec<&'a EdgeRecord> {
        let table = self.table;
        let filtering = table.has_class_column() && !class_filter.is_empty();
        let mut seen = HashSet::new();
        let mut passing = Vec::new();

        for row in table.rows() {
            if row.source == hub_id {
                continue;
            }
            if filtering && !table.class_of(row).is_some_and(|c| class_filter.contains(c)) {
                continue;
            }
            if seen.insert(row.source.as_str()) {
                passing.push(row);
            }
        }
        passing
    }

    /// `"{column}: {value}\n"` for every column, in table order.
    fn tooltip(&self, row: &EdgeRecord) -> String {
        self.table
            .fields(row)
            .map(|f| format!("{}: {}\n", f.column, f.value))
            .collect()
    }
}
