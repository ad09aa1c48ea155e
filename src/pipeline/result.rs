use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::pipeline::shades::TonalRamp;

pub const DEFAULT_PRIMARY: Color = Color::new(0xEC, 0x1B, 0x23);
pub const DEFAULT_ACCENT: Color = Color::new(0x24, 0x26, 0x8C);

/// Neutrals appended to every extracted palette, lightest first.
pub const NEUTRALS: [Color; 8] = [
    Color::new(0xFF, 0xFF, 0xFF),
    Color::new(0xF8, 0xFA, 0xFC),
    Color::new(0xE2, 0xE8, 0xF0),
    Color::new(0x94, 0xA3, 0xB8),
    Color::new(0x47, 0x55, 0x69),
    Color::new(0x1E, 0x29, 0x3B),
    Color::new(0x0F, 0x17, 0x2A),
    Color::new(0x00, 0x00, 0x00),
];

/// Distinct colors past primary and accent that also get a ramp.
const EXTRA_RAMPS: usize = 2;

/// Primary/accent pair plus the swatches offered to the color picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub primary: Color,
    pub accent: Color,
    pub palette: Vec<Color>,
}

impl ExtractionResult {
    /// Build a result from distinct colors ranked by frequency.
    ///
    /// Returns `None` when there are no colors. A lone color gets its
    /// inversion as accent.
    pub fn from_distinct(distinct: &[Color]) -> Option<Self> {
        let primary = *distinct.first()?;
        let accent = distinct.get(1).copied().unwrap_or_else(|| primary.inverted());

        let extras = distinct.iter().skip(2).take(EXTRA_RAMPS).copied();
        let ramps = [primary, accent]
            .into_iter()
            .chain(extras)
            .flat_map(|c| TonalRamp::new(c).as_slice().to_vec());
        let palette = dedup(ramps.chain(NEUTRALS));

        Some(Self {
            primary,
            accent,
            palette,
        })
    }

    /// The result used whenever an image yields nothing usable.
    pub fn fallback() -> Self {
        let primary = TonalRamp::new(DEFAULT_PRIMARY);
        let accent = TonalRamp::new(DEFAULT_ACCENT);
        let ramps = primary
            .iter()
            .chain(accent.iter())
            .chain([Color::WHITE, Color::BLACK]);
        Self {
            primary: DEFAULT_PRIMARY,
            accent: DEFAULT_ACCENT,
            palette: dedup(ramps),
        }
    }

    pub fn palette_hex(&self) -> Vec<String> {
        self.palette.iter().map(|c| c.to_hex()).collect()
    }
}

/// Drop repeated colors, keeping the first occurrence.
pub fn dedup(colors: impl IntoIterator<Item = Color>) -> Vec<Color> {
    let mut seen = HashSet::new();
    colors.into_iter().filter(|c| seen.insert(*c)).collect()
}
