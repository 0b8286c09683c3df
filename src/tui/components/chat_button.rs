//! # ChatButton Component
//!
//! The one pressable primitive every composer control is built from.
//!
//! ## Variants and sizes
//!
//! | Variant   | Look                              |
//! |-----------|-----------------------------------|
//! | `Control` | neutral, gray on default bg       |
//! | `Search`  | primary, black on cyan, bold      |
//! | `Send`    | accent, white on magenta, bold    |
//!
//! `ButtonSize::Icon` is a fixed square-ish cell (`ICON_WIDTH` columns);
//! `ButtonSize::Auto` fits the content plus one column of padding each side.
//!
//! ## Composition (`as_child`)
//!
//! With `as_child(true)` the button draws no padding of its own. It merges
//! its style onto the caller's `Line` and renders that instead, so a trigger
//! made of several spans (icon, label, badge, chevron) gets exactly the same
//! look as a plain button without restating the style table.
//!
//! ## Tooltip
//!
//! The tooltip is not drawn by `render`; the parent calls
//! [`render_tooltip`] for the hovered button after everything else, so the
//! label sits on top of neighbouring widgets.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

/// Width of an icon-sized button.
pub const ICON_WIDTH: u16 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Control,
    Search,
    Send,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    #[default]
    Icon,
    Auto,
}

pub struct ChatButton<'a> {
    content: Line<'a>,
    variant: ButtonVariant,
    size: ButtonSize,
    tooltip: Option<&'a str>,
    disabled: bool,
    active: bool,
    as_child: bool,
}

impl<'a> ChatButton<'a> {
    pub fn new(content: impl Into<Line<'a>>) -> Self {
        Self {
            content: content.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            tooltip: None,
            disabled: false,
            active: false,
            as_child: false,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Destructive highlight, used while a control's operation is running.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Render the caller's line with this button's style instead of the
    /// button's own padded cell.
    pub fn as_child(mut self, as_child: bool) -> Self {
        self.as_child = as_child;
        self
    }

    pub fn tooltip_text(&self) -> Option<&'a str> {
        self.tooltip
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn style(&self) -> Style {
        let base = if self.active {
            Style::default().fg(Color::White).bg(Color::Red)
        } else {
            match self.variant {
                ButtonVariant::Control => Style::default().fg(Color::Gray).bg(Color::Black),
                ButtonVariant::Search => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                ButtonVariant::Send => Style::default()
                    .fg(Color::White)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            }
        };
        if self.disabled {
            base.add_modifier(Modifier::DIM)
        } else {
            base
        }
    }

    /// Columns this button occupies.
    pub fn width(&self) -> u16 {
        let content = self.content.width() as u16;
        match (self.as_child, self.size) {
            (true, _) => content,
            (false, ButtonSize::Icon) => ICON_WIDTH.max(content + 2),
            (false, ButtonSize::Auto) => content + 2,
        }
    }
}

impl Component for ChatButton<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = self.style();
        let line = if self.as_child {
            self.content.clone().patch_style(style)
        } else {
            self.content.clone().patch_style(style).centered()
        };
        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}

/// Draw `text` centered one row above `anchor`, clamped to `bounds`.
pub fn render_tooltip(frame: &mut Frame, anchor: Rect, text: &str, bounds: Rect) {
    if anchor.y <= bounds.y {
        return;
    }
    let width = (text.width() as u16 + 2).min(bounds.width);
    let center = anchor.x + anchor.width / 2;
    let max_x = bounds.x + bounds.width.saturating_sub(width);
    let x = center.saturating_sub(width / 2).clamp(bounds.x, max_x.max(bounds.x));
    let area = Rect::new(x, anchor.y - 1, width, 1);

    let style = Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(format!(" {text} ")).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::text::Span;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_default_is_control_icon() {
        let button = ChatButton::new("➤");
        assert_eq!(button.variant, ButtonVariant::Control);
        assert_eq!(button.size, ButtonSize::Icon);
        assert_eq!(button.width(), ICON_WIDTH);
    }

    #[test]
    fn test_auto_size_fits_label() {
        let button = ChatButton::new("Search").size(ButtonSize::Auto);
        assert_eq!(button.width(), 8);
    }

    #[test]
    fn test_as_child_takes_child_width() {
        let line = Line::from(vec![Span::raw("⌕ "), Span::raw("Search"), Span::raw(" ▾")]);
        let button = ChatButton::new(line).as_child(true);
        assert_eq!(button.width(), 10);
    }

    #[test]
    fn test_variant_styles_differ() {
        let control = ChatButton::new("x").style();
        let search = ChatButton::new("x").variant(ButtonVariant::Search).style();
        let send = ChatButton::new("x").variant(ButtonVariant::Send).style();
        assert_ne!(control, search);
        assert_ne!(search, send);
        assert_eq!(send.bg, Some(Color::Magenta));
    }

    #[test]
    fn test_disabled_is_dimmed() {
        let style = ChatButton::new("x").disabled(true).style();
        assert!(style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_active_overrides_variant() {
        let style = ChatButton::new("x")
            .variant(ButtonVariant::Send)
            .active(true)
            .style();
        assert_eq!(style.bg, Some(Color::Red));
    }

    #[test]
    fn test_as_child_shares_style_with_plain_button() {
        let mut terminal = Terminal::new(TestBackend::new(20, 2)).unwrap();
        terminal
            .draw(|f| {
                ChatButton::new("Labs")
                    .variant(ButtonVariant::Search)
                    .size(ButtonSize::Auto)
                    .render(f, Rect::new(0, 0, 6, 1));
                ChatButton::new(Line::from("Labs"))
                    .variant(ButtonVariant::Search)
                    .as_child(true)
                    .render(f, Rect::new(0, 1, 4, 1));
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(1, 0)].symbol(), "L");
        assert_eq!(buffer[(0, 1)].symbol(), "L");
        assert_eq!(buffer[(1, 0)].bg, buffer[(0, 1)].bg);
        assert_eq!(buffer[(1, 0)].fg, buffer[(0, 1)].fg);
    }

    #[test]
    fn test_tooltip_renders_above_anchor() {
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|f| {
                let bounds = f.area();
                render_tooltip(f, Rect::new(10, 2, 5, 1), "Voice Input", bounds);
            })
            .unwrap();
        assert!(row_text(&terminal, 1).contains("Voice Input"));
        assert!(!row_text(&terminal, 2).contains("Voice"));
    }

    #[test]
    fn test_tooltip_skipped_at_top_edge() {
        let mut terminal = Terminal::new(TestBackend::new(30, 2)).unwrap();
        terminal
            .draw(|f| {
                let bounds = f.area();
                render_tooltip(f, Rect::new(0, 0, 5, 1), "Send", bounds);
            })
            .unwrap();
        assert!(!row_text(&terminal, 0).contains("Send"));
    }
}
