//! rotinet-graph: Star-topology graph construction for the network view.
//!
//! One hub node (the most frequent `target`) sits at the origin; every
//! distinct `source` is placed on a circle around it and joined to the hub.
//! The resulting [`GraphModel`] serializes straight into vis-network data.

pub mod builder;
pub mod color;
pub mod hub;
pub mod layout;
pub mod model;
pub mod view_state;

pub use builder::GraphBuilder;
pub use color::{font_color, ColorMap};
pub use hub::select_hub;
pub use layout::{star_layout, Position};
pub use model::GraphModel;
pub use view_state::{ControlInput, GraphStyle, ViewState};
