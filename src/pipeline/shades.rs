use crate::color::Color;

/// Weights toward white, heaviest tint first.
pub const TINT_WEIGHTS: [f64; 7] = [0.96, 0.90, 0.80, 0.70, 0.60, 0.45, 0.30];
/// Weights toward black, lightest shade first.
pub const SHADE_WEIGHTS: [f64; 7] = [0.15, 0.30, 0.45, 0.60, 0.70, 0.80, 0.92];

pub const RAMP_LEN: usize = TINT_WEIGHTS.len() + 1 + SHADE_WEIGHTS.len();
pub const BASE_INDEX: usize = TINT_WEIGHTS.len();

/// 15-step tint → base → shade sequence derived from one base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TonalRamp([Color; RAMP_LEN]);

impl TonalRamp {
    pub fn new(base: Color) -> Self {
        let mut steps = [base; RAMP_LEN];
        for (slot, &w) in steps.iter_mut().zip(TINT_WEIGHTS.iter()) {
            *slot = base.mix(Color::WHITE, w);
        }
        for (slot, &w) in steps[BASE_INDEX + 1..].iter_mut().zip(SHADE_WEIGHTS.iter()) {
            *slot = base.mix(Color::BLACK, w);
        }
        Self(steps)
    }

    pub fn base(&self) -> Color {
        self.0[BASE_INDEX]
    }

    pub fn tints(&self) -> &[Color] {
        &self.0[..BASE_INDEX]
    }

    pub fn shades(&self) -> &[Color] {
        &self.0[BASE_INDEX + 1..]
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.0.iter().copied()
    }
}

/// Ramp for an arbitrary hex string, as uppercase hex.
///
/// Malformed input is treated as black, so the base entry is always the
/// canonical form of whatever color the input parsed to.
pub fn generate_expanded_shades(hex: &str) -> Vec<String> {
    TonalRamp::new(Color::from_hex_lossy(hex))
        .iter()
        .map(Color::to_hex)
        .collect()
}
