pub mod widgets;

use std::io::Write;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use tracing::debug;

use crate::color::Color;
use crate::pipeline::shades::BASE_INDEX;
use crate::scheme::{ColorRole, ColorScheme};
use widgets::SwatchStripWidget;

const PREVIEW_PER_ROW: usize = 8;

/// State for the interactive shade picker.
pub struct PickerApp {
    pub scheme: ColorScheme,
    pub role: ColorRole,
    pub cursor: usize,
    pub should_quit: bool,
}

impl PickerApp {
    /// Start on `role` with the cursor on its current value.
    pub fn new(scheme: ColorScheme, role: ColorRole) -> Self {
        Self {
            scheme,
            role,
            cursor: BASE_INDEX,
            should_quit: false,
        }
    }

    /// Strip for the active role, regenerated from its current value.
    pub fn strip(&self) -> Vec<Color> {
        self.scheme.swatch_strip(self.role)
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                let last = self.strip().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            KeyCode::Tab => {
                self.role = self.role.next();
                self.cursor = BASE_INDEX;
            }
            KeyCode::BackTab => {
                self.role = self.role.prev();
                self.cursor = BASE_INDEX;
            }
            KeyCode::Enter => {
                if let Some(&picked) = self.strip().get(self.cursor) {
                    debug!(role = ?self.role, color = %picked, "picked swatch");
                    self.scheme.set(self.role, picked);
                    // the strip is rebuilt around the new value
                    self.cursor = BASE_INDEX;
                }
            }
            _ => {}
        }
    }
}

/// Launch the picker and return the scheme as it was when the user quit.
pub fn run(mut app: PickerApp) -> Result<ColorScheme> {
    let mut terminal = ratatui::init();
    let outcome = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    outcome?;
    Ok(app.scheme)
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, app: &mut PickerApp) -> Result<()> {
    while !app.should_quit {
        let strip = app.strip();
        terminal
            .draw(|frame| {
                let widget = SwatchStripWidget::new(&app.scheme, app.role, &strip, app.cursor);
                frame.render_widget(widget, frame.area());
            })
            .context("failed to draw picker")?;

        if let Event::Key(key) = event::read().context("failed to read terminal event")? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }
    }
    Ok(())
}

/// Print colors as rows of truecolor swatches labeled with their hex value.
pub fn print_preview(out: &mut impl Write, colors: &[Color]) -> Result<()> {
    for row in colors.chunks(PREVIEW_PER_ROW) {
        for &c in row {
            let fg = c.contrast_color();
            queue!(
                out,
                SetBackgroundColor(TermColor::Rgb { r: c.r, g: c.g, b: c.b }),
                SetForegroundColor(TermColor::Rgb { r: fg.r, g: fg.g, b: fg.b }),
                Print(format!(" {} ", c.to_hex())),
                ResetColor,
                Print(" "),
            )?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::result::ExtractionResult;

    fn seeded_app(role: ColorRole) -> PickerApp {
        let mut scheme = ColorScheme::default();
        scheme.apply_extraction(&ExtractionResult::fallback());
        PickerApp::new(scheme, role)
    }

    #[test]
    fn cursor_starts_on_current_value() {
        let app = seeded_app(ColorRole::Accent);
        assert_eq!(app.strip()[app.cursor], app.scheme.accent);
    }

    #[test]
    fn cursor_is_clamped() {
        let mut app = seeded_app(ColorRole::Primary);
        for _ in 0..20 {
            app.handle_key(KeyCode::Left);
        }
        assert_eq!(app.cursor, 0);
        for _ in 0..200 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.cursor, app.strip().len() - 1);
    }

    #[test]
    fn enter_assigns_swatch_to_role() {
        let mut app = seeded_app(ColorRole::Title);
        app.handle_key(KeyCode::Right);
        let expected = app.strip()[BASE_INDEX + 1];
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.scheme.title, expected);
        assert_eq!(app.strip()[app.cursor], expected);
        // other roles untouched
        assert_eq!(app.scheme.primary, Color::new(0xEC, 0x1B, 0x23));
    }

    #[test]
    fn tab_cycles_roles() {
        let mut app = seeded_app(ColorRole::DesignElements);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.role, ColorRole::Primary);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.role, ColorRole::DesignElements);
    }

    #[test]
    fn quit_keys() {
        let mut app = seeded_app(ColorRole::Primary);
        app.handle_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn preview_writes_one_label_per_color() {
        let colors = crate::pipeline::shades::TonalRamp::new(Color::new(0x33, 0x66, 0x99));
        let mut out = Vec::new();
        print_preview(&mut out, colors.as_slice()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(" #").count(), 15);
        assert!(text.contains("#336699"));
        assert_eq!(text.lines().count(), 2);
    }
}
