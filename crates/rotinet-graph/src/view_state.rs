//! Per-session control state of the network view.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::color::ColorMap;

pub const IMAGE_SIZE_RANGE: RangeInclusive<u32> = 20..=100;
pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 8..=40;
pub const CONNECTION_WIDTH_RANGE: RangeInclusive<u32> = 1..=10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStyle {
    pub image_size: u32,
    pub font_size: u32,
    pub connection_width: u32,
    pub bg_color: String,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            image_size: 50,
            font_size: 14,
            connection_width: 2,
            bg_color: "#ffffff".to_string(),
        }
    }
}

/// Control values submitted with one request. `None` keeps the session value.
#[derive(Debug, Clone, Default)]
pub struct ControlInput {
    pub image_size: Option<u32>,
    pub font_size: Option<u32>,
    pub connection_width: Option<u32>,
    pub bg_color: Option<String>,
    pub classes: Option<Vec<String>>,
    pub show_info: Option<bool>,
}

#[derive(Debug)]
pub struct ViewState {
    pub style: GraphStyle,
    pub selected_classes: BTreeSet<String>,
    pub show_info: bool,
    pub colors: ColorMap,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            style: GraphStyle::default(),
            selected_classes: BTreeSet::new(),
            show_info: true,
            colors: ColorMap::new(),
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold submitted controls into the session. Numbers are clamped to their
    /// slider range; a malformed color leaves the previous one in place.
    pub fn apply(&mut self, input: &ControlInput) {
        if let Some(v) = input.image_size {
            self.style.image_size = clamp(v, &IMAGE_SIZE_RANGE);
        }
        if let Some(v) = input.font_size {
            self.style.font_size = clamp(v, &FONT_SIZE_RANGE);
        }
        if let Some(v) = input.connection_width {
            self.style.connection_width = clamp(v, &CONNECTION_WIDTH_RANGE);
        }
        if let Some(color) = input.bg_color.as_deref().filter(|c| is_hex_color(c)) {
            self.style.bg_color = color.to_ascii_lowercase();
        }
        if let Some(classes) = &input.classes {
            self.selected_classes = classes.iter().filter(|c| !c.is_empty()).cloned().collect();
        }
        if let Some(show) = input.show_info {
            self.show_info = show;
        }
    }
}

fn clamp(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

/// `#rrggbb`, either case.
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].bytes().all(|b| b.is_ascii_hexdigit())
}
