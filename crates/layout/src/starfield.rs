//! Deterministic star field.
//!
//! Star positions are a pure function of the star index: three
//! multiplicative hashes truncated to 32 bits. There is no seed, no state and
//! no clock, so every render of the same density is pixel-identical.

use serde::Serialize;

const LEFT_MULTIPLIER: u64 = 2_654_435_761;
const TOP_MULTIPLIER: u64 = 1_234_567_891;
const OPACITY_MULTIPLIER: u64 = 987_654_321;

/// One star: position in percent of the canvas, opacity in `[0.2, 0.69]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub top_percent: f64,
    pub left_percent: f64,
    pub opacity: f64,
}

impl Star {
    /// CSS `top` value with the shortest decimal form, e.g. `"57.82%"`.
    pub fn css_top(&self) -> String {
        format!("{}%", self.top_percent)
    }

    pub fn css_left(&self) -> String {
        format!("{}%", self.left_percent)
    }
}

fn hash32(index: usize, multiplier: u64) -> u32 {
    (index as u64).wrapping_mul(multiplier) as u32
}

/// The star at `index`.
pub fn star_at(index: usize) -> Star {
    Star {
        left_percent: f64::from(hash32(index, LEFT_MULTIPLIER) % 10_000) / 100.0,
        top_percent: f64::from(hash32(index, TOP_MULTIPLIER) % 10_000) / 100.0,
        opacity: f64::from(hash32(index, OPACITY_MULTIPLIER) % 50) / 100.0 + 0.2,
    }
}

/// The first `count` stars, in index order.
pub fn star_positions(count: usize) -> Vec<Star> {
    (0..count).map(star_at).collect()
}
