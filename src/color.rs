use anyhow::{bail, Result};
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Core color type used throughout the pipeline.
/// Wraps sRGB u8 components; the canonical text form is uppercase `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800`, `#FF8800` or `ff8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            bail!(
                "invalid hex color {hex:?}: expected 6 hex digits, got {}",
                digits.len()
            );
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("invalid hex color {hex:?}: non-hex character");
        }
        let r = u8::from_str_radix(&digits[0..2], 16)?;
        let g = u8::from_str_radix(&digits[2..4], 16)?;
        let b = u8::from_str_radix(&digits[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Like [`Color::from_hex`], but malformed input silently becomes black.
    /// Use `from_hex` when the caller needs to report bad input.
    pub fn from_hex_lossy(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::BLACK)
    }

    /// Serialize to uppercase hex `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Hue in degrees, saturation and lightness in [0, 1].
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let srgb: Srgb<f32> = self.to_srgb_u8().into_format();
        let hsl: Hsl = srgb.into_color();
        (hsl.hue.into_positive_degrees(), hsl.saturation, hsl.lightness)
    }

    /// Luma scaled by 1000: `299r + 587g + 114b`.
    ///
    /// Kept in integers so the 128 boundary in [`contrast_color`] is exact.
    pub fn luma_milli(self) -> u32 {
        299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32
    }

    /// Weighted brightness in [0, 255].
    pub fn luma(self) -> f64 {
        self.luma_milli() as f64 / 1000.0
    }

    /// Text color (black or white) that stays readable on top of this color.
    pub fn contrast_color(self) -> Color {
        if self.luma_milli() >= 128_000 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    /// Euclidean distance in RGB space, in [0, ~441.7].
    pub fn distance(self, other: Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    pub fn is_grayscale(self) -> bool {
        is_grayscale(self.r, self.g, self.b)
    }

    /// Linear interpolation toward `other`; `weight` 0 is `self`, 1 is `other`.
    /// Each channel is rounded independently.
    pub fn mix(self, other: Color, weight: f64) -> Color {
        fn lerp(a: u8, b: u8, weight: f64) -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * weight;
            v.round().clamp(0.0, 255.0) as u8
        }
        Color {
            r: lerp(self.r, other.r, weight),
            g: lerp(self.g, other.g, weight),
            b: lerp(self.b, other.b, weight),
        }
    }

    /// Channel-wise inversion.
    pub fn inverted(self) -> Color {
        Color {
            r: 255 - self.r,
            g: 255 - self.g,
            b: 255 - self.b,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse `#RRGGBB` / `RRGGBB`; malformed input yields black.
pub fn hex_to_rgb(hex: &str) -> Color {
    Color::from_hex_lossy(hex)
}

/// Format channels as uppercase `#RRGGBB`.
///
/// Channels are `u8`, so out-of-range values are rejected by the type system.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    Color::new(r, g, b).to_hex()
}

/// `"#000000"` for light backgrounds (luma >= 128), `"#FFFFFF"` otherwise.
pub fn contrast_color(hex: &str) -> &'static str {
    if hex_to_rgb(hex).contrast_color() == Color::BLACK {
        "#000000"
    } else {
        "#FFFFFF"
    }
}

pub fn color_distance(c1: Color, c2: Color) -> f64 {
    c1.distance(c2)
}

/// True when the channel spread is under 15.
pub fn is_grayscale(r: u8, g: u8, b: u8) -> bool {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    max - min < 15
}

pub fn mix(c1: Color, c2: Color, weight: f64) -> Color {
    c1.mix(c2, weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let original = Color::from_hex("#ff8800").unwrap();
        assert_eq!(original, Color::new(255, 136, 0));
        assert_eq!(original.to_hex(), "#FF8800");
    }

    #[test]
    fn hex_without_hash() {
        assert_eq!(hex_to_rgb("abc123"), Color::new(0xab, 0xc1, 0x23));
        assert_eq!(hex_to_rgb("#abc123"), hex_to_rgb("ABC123"));
    }

    #[test]
    fn hex_invalid_length() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#ff880000").is_err());
    }

    #[test]
    fn hex_invalid_chars() {
        assert!(Color::from_hex("#gggggg").is_err());
        // from_str_radix alone would accept a leading sign
        assert!(Color::from_hex("+fffff").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn malformed_hex_falls_back_to_black() {
        for input in ["", "#", "#12345", "##123456", "red", " #123456"] {
            assert_eq!(hex_to_rgb(input), Color::BLACK, "input {input:?}");
        }
    }

    #[test]
    fn rgb_to_hex_is_uppercase_and_padded() {
        assert_eq!(rgb_to_hex(0, 10, 255), "#000AFF");
        assert_eq!(rgb_to_hex(171, 205, 239), "#ABCDEF");
    }

    #[test]
    fn contrast_boundary_is_inclusive_on_black() {
        assert_eq!(Color::new(128, 128, 128).luma(), 128.0);
        assert_eq!(contrast_color("#808080"), "#000000");
        assert_eq!(contrast_color("#7F7F7F"), "#FFFFFF");
        assert_eq!(contrast_color("#FFFFFF"), "#000000");
        assert_eq!(contrast_color("#000000"), "#FFFFFF");
    }

    #[test]
    fn contrast_weights_green_over_blue() {
        // luma 149.7 vs 29.07
        assert_eq!(contrast_color("#00FF00"), "#000000");
        assert_eq!(contrast_color("#0000FF"), "#FFFFFF");
    }

    #[test]
    fn distance_extremes() {
        assert_eq!(color_distance(Color::BLACK, Color::BLACK), 0.0);
        let d = color_distance(Color::BLACK, Color::WHITE);
        assert!((d - 441.672).abs() < 0.001, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Color::new(200, 50, 50);
        let b = Color::new(50, 200, 60);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn grayscale_spread_threshold() {
        assert!(is_grayscale(100, 100, 100));
        assert!(is_grayscale(100, 114, 107));
        assert!(!is_grayscale(100, 115, 107));
    }

    #[test]
    fn mix_endpoints() {
        let a = Color::new(10, 200, 33);
        let b = Color::new(250, 0, 99);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
    }

    #[test]
    fn mix_rounds_each_channel() {
        // 51 * 0.5 = 25.5 rounds up
        let mixed = Color::new(51, 102, 153).mix(Color::BLACK, 0.5);
        assert_eq!(mixed, Color::new(26, 51, 77));
    }

    #[test]
    fn inversion() {
        assert_eq!(Color::new(0x33, 0x66, 0x99).inverted().to_hex(), "#CC9966");
    }

    #[test]
    fn hsl_of_pure_red() {
        let (h, s, l) = Color::new(255, 0, 0).to_hsl();
        assert!(h.abs() < 0.5 || (h - 360.0).abs() < 0.5, "hue {h}");
        assert!((s - 1.0).abs() < 0.001);
        assert!((l - 0.5).abs() < 0.001);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: Color = serde_json::from_str("\"#0a0B0c\"").unwrap();
        assert_eq!(back, Color::new(10, 11, 12));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn display_matches_to_hex() {
        let color = Color::new(171, 205, 239);
        assert_eq!(format!("{color}"), color.to_hex());
    }
}
