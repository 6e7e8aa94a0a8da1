//! Fixed radial placement: hub at the origin, sources evenly on a circle.

use std::f64::consts::PI;

use serde::Serialize;

pub const BASE_RADIUS: f64 = 400.0;
/// Radius growth per placed node, to reduce overlap at higher density.
pub const RADIUS_PER_NODE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Circle radius for `n` placed nodes: `400 + 2n`.
pub fn radius(n: usize) -> f64 {
    BASE_RADIUS + RADIUS_PER_NODE * n as f64
}

/// Position of each id, in input order. Node `i` of `n` sits at angle `2πi/n`.
pub fn star_layout<S: AsRef<str>>(ids: &[S]) -> Vec<Position> {
    let n = ids.len();
    if n == 0 {
        return Vec::new();
    }
    let r = radius(n);
    (0..n)
        .map(|i| {
            let angle = 2.0 * PI * (i as f64 / n as f64);
            Position { x: r * angle.cos(), y: r * angle.sin() }
        })
        .collect()
}
