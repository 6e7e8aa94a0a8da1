//! Renderable graph, serialized in the shape vis-network consumes.

use serde::Serialize;

pub const HUB_SHAPE: &str = "image";
pub const SOURCE_SHAPE: &str = "box";
pub const HIGHLIGHT_EDGE_COLOR: &str = "#FFD700";
pub const BASE_EDGE_COLOR: &str = "#7f8c8d";
pub const FONT_FACE: &str = "Arial";
pub const EDGE_CURVE: &str = "curvedCW";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphModel {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
    pub options: VisOptions,
    /// Canvas background; not a vis-network option.
    pub background: String,
}

impl GraphModel {
    /// The hub is always the first node.
    pub fn hub(&self) -> &VisNode {
        &self.nodes[0]
    }

    pub fn source_nodes(&self) -> &[VisNode] {
        &self.nodes[1..]
    }

    pub fn node(&self, id: &str) -> Option<&VisNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge_from(&self, id: &str) -> Option<&VisEdge> {
        self.edges.iter().find(|e| e.from == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisNode {
    pub id: String,
    pub label: String,
    pub shape: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub size: u32,
    pub color: NodeColor,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    /// Hover tooltip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub physics: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NodeColor {
    Solid(String),
    Split { background: String, border: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Font {
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisEdge {
    pub from: String,
    pub to: String,
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisOptions {
    pub nodes: NodeOptions,
    pub edges: EdgeOptions,
    pub physics: Toggle,
    pub interaction: Interaction,
}

impl VisOptions {
    pub fn new(font_size: u32, connection_width: u32) -> Self {
        Self {
            nodes: NodeOptions {
                font: FaceFont { size: font_size, face: FONT_FACE },
                shape_properties: ShapeProperties { border_radius: 2 },
            },
            edges: EdgeOptions {
                smooth: Smooth { enabled: true, kind: EDGE_CURVE },
                width: connection_width,
            },
            physics: Toggle { enabled: false },
            interaction: Interaction { hover: true },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOptions {
    pub font: FaceFont,
    pub shape_properties: ShapeProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaceFont {
    pub size: u32,
    pub face: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    pub border_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeOptions {
    pub smooth: Smooth,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Smooth {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub hover: bool,
}
