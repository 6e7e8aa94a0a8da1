//! Session color map and the font contrast rule.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Backgrounds strictly brighter than this (as a 24-bit integer) get black text.
pub const CONTRAST_THRESHOLD: u32 = 0x888888;

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#ffffff";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Node id → `#RRGGBB`. Entries are added on first sight and never changed.
pub struct ColorMap {
    colors: HashMap<String, String>,
    rng: StdRng,
}

impl ColorMap {
    pub fn new() -> Self {
        Self { colors: HashMap::new(), rng: StdRng::from_entropy() }
    }

    /// Reproducible colors, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self { colors: HashMap::new(), rng: StdRng::seed_from_u64(seed) }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.colors.get(id).map(String::as_str)
    }

    /// Color of `id`, assigning a random one if it has none yet.
    pub fn assign(&mut self, id: &str) -> &str {
        let rng = &mut self.rng;
        self.colors
            .entry(id.to_string())
            .or_insert_with(|| random_color(rng))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ColorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorMap").field("colors", &self.colors).finish_non_exhaustive()
    }
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        color.push(HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char);
    }
    color
}

/// Black on backgrounds above [`CONTRAST_THRESHOLD`], white otherwise.
/// Unparseable colors count as dark.
pub fn font_color(background: &str) -> &'static str {
    let value = u32::from_str_radix(background.trim_start_matches('#'), 16).unwrap_or(0);
    if value > CONTRAST_THRESHOLD {
        BLACK
    } else {
        WHITE
    }
}
