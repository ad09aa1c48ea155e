use serde::{Deserialize, Serialize};

use crate::color::{contrast_color, Color};
use crate::pipeline::result::{dedup, ExtractionResult};
use crate::pipeline::shades::TonalRamp;

/// A color slot on the job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    Primary,
    Accent,
    Title,
    Text,
    Canvas,
    Icons,
    DesignElements,
}

impl ColorRole {
    pub const ALL: [ColorRole; 7] = [
        ColorRole::Primary,
        ColorRole::Accent,
        ColorRole::Title,
        ColorRole::Text,
        ColorRole::Canvas,
        ColorRole::Icons,
        ColorRole::DesignElements,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ColorRole::Primary => "Primary",
            ColorRole::Accent => "Accent",
            ColorRole::Title => "Title",
            ColorRole::Text => "Text",
            ColorRole::Canvas => "Canvas",
            ColorRole::Icons => "Icons",
            ColorRole::DesignElements => "Design elements",
        }
    }

    pub fn next(self) -> ColorRole {
        let i = Self::ALL.iter().position(|&r| r == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> ColorRole {
        let i = Self::ALL.iter().position(|&r| r == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The card's color roles plus the palette extracted from the last upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: Color,
    pub accent: Color,
    pub title: Color,
    pub text: Color,
    pub canvas: Color,
    pub icons: Color,
    pub design_elements: Color,
    #[serde(default)]
    pub generated_palette: Vec<Color>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: Color::new(0x0F, 0x17, 0x2A),
            accent: Color::new(0x3B, 0x82, 0xF6),
            title: Color::new(0x0F, 0x17, 0x2A),
            text: Color::new(0x33, 0x41, 0x55),
            canvas: Color::WHITE,
            icons: Color::new(0x3B, 0x82, 0xF6),
            design_elements: Color::new(0xE2, 0xE8, 0xF0),
            generated_palette: Vec::new(),
        }
    }
}

impl ColorScheme {
    pub fn get(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Accent => self.accent,
            ColorRole::Title => self.title,
            ColorRole::Text => self.text,
            ColorRole::Canvas => self.canvas,
            ColorRole::Icons => self.icons,
            ColorRole::DesignElements => self.design_elements,
        }
    }

    pub fn set(&mut self, role: ColorRole, color: Color) {
        let slot = match role {
            ColorRole::Primary => &mut self.primary,
            ColorRole::Accent => &mut self.accent,
            ColorRole::Title => &mut self.title,
            ColorRole::Text => &mut self.text,
            ColorRole::Canvas => &mut self.canvas,
            ColorRole::Icons => &mut self.icons,
            ColorRole::DesignElements => &mut self.design_elements,
        };
        *slot = color;
    }

    /// Seed the roles from a fresh extraction. Body text keeps its color.
    pub fn apply_extraction(&mut self, result: &ExtractionResult) {
        self.primary = result.primary;
        self.accent = result.accent;
        self.title = result.primary;
        self.icons = result.accent;
        self.canvas = Color::WHITE;
        self.design_elements = result.accent;
        self.generated_palette = result.palette.clone();
    }

    /// Apply `result` only if `ticket` is still the latest request.
    /// Returns whether it was applied.
    pub fn apply_if_current(
        &mut self,
        requests: &ExtractionRequests,
        ticket: RequestTicket,
        result: &ExtractionResult,
    ) -> bool {
        if !requests.accept(ticket) {
            return false;
        }
        self.apply_extraction(result);
        true
    }

    /// Swatches offered for one role: the ramp of its current color, then the
    /// generated palette, without repeats.
    pub fn swatch_strip(&self, role: ColorRole) -> Vec<Color> {
        let ramp = TonalRamp::new(self.get(role));
        dedup(ramp.iter().chain(self.generated_palette.iter().copied()))
    }

    /// Whether overlaid text and logos should be light.
    pub fn is_dark_canvas(&self) -> bool {
        contrast_color(&self.canvas.to_hex()) == "#FFFFFF"
    }
}

/// Sequence stamp for one extraction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Last-writer-wins arbitration for overlapping extractions.
///
/// Extractions are never cancelled, so an older upload can finish after a
/// newer one. Stamp each request with [`begin`](Self::begin) and only apply
/// results whose ticket is still the latest.
#[derive(Debug, Default)]
pub struct ExtractionRequests {
    latest: u64,
}

impl ExtractionRequests {
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn accept(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}
