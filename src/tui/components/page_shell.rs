//! # Page Shell
//!
//! The page around the composer: a bold title, a muted subtitle and a centered
//! column holding the widget. The whole group is centered vertically, so the
//! composer drifts upward as it grows.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const TITLE: &str = "DeepSite AI Chat";
pub const SUBTITLE: &str = "Ask anything or @mention a Space to get started";

/// Widget column width cap (the shell's max-width container).
pub const MAX_WIDGET_WIDTH: u16 = 72;

/// Areas produced by the shell layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellAreas {
    pub title: Rect,
    pub subtitle: Rect,
    pub widget: Rect,
}

/// Lay out the shell in `area` for a widget `widget_height` rows tall.
pub fn shell_layout(area: Rect, widget_height: u16) -> ShellAreas {
    use Constraint::Length;

    let [title, subtitle, _spacer, widget_row] = Layout::vertical([
        Length(1),
        Length(1),
        Length(1),
        Length(widget_height),
    ])
    .flex(Flex::Center)
    .areas(area);

    let width = MAX_WIDGET_WIDTH.min(area.width.saturating_sub(2));
    let [widget] = Layout::horizontal([Length(width)])
        .flex(Flex::Center)
        .areas(widget_row);

    ShellAreas {
        title,
        subtitle,
        widget,
    }
}

pub struct PageShell {
    widget_height: u16,
}

impl PageShell {
    pub fn new(widget_height: u16) -> Self {
        Self { widget_height }
    }

    /// Where the widget goes inside `area`.
    pub fn widget_area(&self, area: Rect) -> Rect {
        shell_layout(area, self.widget_height).widget
    }
}

impl Component for PageShell {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let areas = shell_layout(area, self.widget_height);

        let title = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, areas.title);

        let subtitle = Paragraph::new(Line::from(Span::styled(
            SUBTITLE,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(subtitle, areas.subtitle);
    }
}
