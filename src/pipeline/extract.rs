use std::collections::HashMap;

use image::RgbaImage;
use tracing::debug;

use crate::color::{is_grayscale, Color};

/// Visit every Nth pixel of the flattened sampling buffer.
pub const SAMPLE_STRIDE: usize = 2;
/// Candidates at or below this RGB distance from a selected color are absorbed.
pub const DISTINCT_THRESHOLD: f64 = 60.0;
pub const MAX_DISTINCT: usize = 5;

const MIN_ALPHA: u8 = 128;
const NEAR_WHITE: u8 = 250;
const NEAR_BLACK: u8 = 15;
const NEUTRAL_LIGHT: u8 = 200;
const NEUTRAL_DARK: u8 = 50;

/// A color observed in the sampling buffer with its occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    pub color: Color,
    pub count: u32,
}

/// Whether an RGBA pixel should be counted in the histogram.
///
/// Drops transparent pixels, near-white and near-black noise, and washed-out
/// neutrals. The neutral bound only looks at the red channel; for grayscale
/// pixels the channels are within 15 of each other anyway.
pub fn is_significant([r, g, b, a]: [u8; 4]) -> bool {
    if a < MIN_ALPHA {
        return false;
    }
    if r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE {
        return false;
    }
    if r < NEAR_BLACK && g < NEAR_BLACK && b < NEAR_BLACK {
        return false;
    }
    if is_grayscale(r, g, b) && (r > NEUTRAL_LIGHT || r < NEUTRAL_DARK) {
        return false;
    }
    true
}

/// Count significant pixels by exact color, ranked by descending count.
///
/// Colors with equal counts keep the order in which they were first seen.
pub fn build_histogram(buffer: &RgbaImage) -> Vec<ColorCount> {
    let mut index: HashMap<Color, usize> = HashMap::new();
    let mut counts: Vec<ColorCount> = Vec::new();
    let mut sampled = 0usize;

    for px in buffer.pixels().step_by(SAMPLE_STRIDE) {
        sampled += 1;
        if !is_significant(px.0) {
            continue;
        }
        let color = Color::new(px[0], px[1], px[2]);
        match index.get(&color) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(color, counts.len());
                counts.push(ColorCount { color, count: 1 });
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    debug!(
        sampled,
        distinct = counts.len(),
        "built color histogram"
    );
    counts
}

/// Greedy frequency-biased selection of mutually distinct colors.
///
/// Takes the most frequent remaining candidate, then drops every candidate
/// within `threshold` of it. Rejected candidates are never reconsidered.
/// Quadratic in the number of candidates, which the fixed sampling buffer
/// keeps small.
pub fn select_distinct(ranked: &[ColorCount], threshold: f64, max: usize) -> Vec<Color> {
    let mut candidates: Vec<Color> = ranked.iter().map(|c| c.color).collect();
    let mut selected = Vec::with_capacity(max);

    while !candidates.is_empty() && selected.len() < max {
        let current = candidates[0];
        selected.push(current);
        candidates.retain(|c| current.distance(*c) > threshold);
    }

    selected
}

/// Histogram plus distinct selection with the fixed thresholds.
pub fn distinct_colors(buffer: &RgbaImage) -> Vec<Color> {
    let histogram = build_histogram(buffer);
    select_distinct(&histogram, DISTINCT_THRESHOLD, MAX_DISTINCT)
}
