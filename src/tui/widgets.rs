use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::scheme::{ColorRole, ColorScheme};

const CELL_WIDTH: u16 = 9;
const CELL_GAP: u16 = 1;

/// Renders the swatch strip of one color role as rows of labeled cells.
/// Highlights the cursor and marks the role's current value.
pub struct SwatchStripWidget<'a> {
    scheme: &'a ColorScheme,
    role: ColorRole,
    strip: &'a [AppColor],
    cursor: usize,
}

impl<'a> SwatchStripWidget<'a> {
    pub fn new(
        scheme: &'a ColorScheme,
        role: ColorRole,
        strip: &'a [AppColor],
        cursor: usize,
    ) -> Self {
        Self {
            scheme,
            role,
            strip,
            cursor,
        }
    }
}

pub(crate) fn to_color(c: AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Black or white label color for readable text on the swatch.
pub(crate) fn label_color(c: AppColor) -> Color {
    to_color(c.contrast_color())
}

/// How many cells fit on one row of the given width.
pub(crate) fn cells_per_row(width: u16) -> usize {
    let usable = width.saturating_sub(2);
    ((usable + CELL_GAP) / (CELL_WIDTH + CELL_GAP)).max(1) as usize
}

fn build_swatch_row(
    cells: &[AppColor],
    start: usize,
    cursor: usize,
    current: AppColor,
) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (offset, &c) in cells.iter().enumerate() {
        let i = start + offset;
        let marker = if c == current { '*' } else { ' ' };
        let label = format!("{marker}{}", c.to_hex());
        let mut style = Style::default().bg(to_color(c)).fg(label_color(c));
        if i == cursor {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(
            format!("{:^width$}", label, width = CELL_WIDTH as usize),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn build_role_tabs(active: ColorRole) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for role in ColorRole::ALL {
        let style = if role == active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(role.label().to_string(), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

impl Widget for SwatchStripWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Swatches");
        let inner = block.inner(area);
        block.render(area, buf);

        let current = self.scheme.get(self.role);
        let per_row = cells_per_row(inner.width);

        let mut lines = vec![build_role_tabs(self.role), Line::from("")];
        for (row, cells) in self.strip.chunks(per_row).enumerate() {
            lines.push(build_swatch_row(cells, row * per_row, self.cursor, current));
        }

        if let Some(&selected) = self.strip.get(self.cursor) {
            let (h, s, l) = selected.to_hsl();
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("  {}  ", self.role.label()),
                    Style::default()
                        .bg(to_color(current))
                        .fg(label_color(current)),
                ),
                Span::raw(format!(
                    "  current {current}  cursor {selected}  text {}  hsl({h:.0}, {:.0}%, {:.0}%)",
                    selected.contrast_color(),
                    s * 100.0,
                    l * 100.0,
                )),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  ←/→ move  Tab/Shift-Tab role  Enter pick  q quit",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
