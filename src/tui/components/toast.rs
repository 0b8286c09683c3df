//! # Toast Stack
//!
//! Terminal implementation of the notification service. Notices stack in the
//! bottom-right corner, newest at the bottom, and disappear after a fixed
//! lifetime. Destructive notices are drawn in red.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::notice::{Notice, Notifier};
use crate::tui::component::Component;

const TOAST_WIDTH: u16 = 44;
/// Border (2) + title line + description line.
const TOAST_HEIGHT: u16 = 4;
const MAX_VISIBLE: usize = 3;

struct Toast {
    notice: Notice,
    shown_at: Instant,
}

pub struct ToastStack {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
}

impl ToastStack {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Notices currently held, oldest first.
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.toasts.iter().map(|t| &t.notice)
    }

    /// Drop toasts older than the lifetime. Returns true if any were removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        let lifetime = self.lifetime;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < lifetime);
        self.toasts.len() != before
    }
}

impl Notifier for ToastStack {
    fn notify(&mut self, notice: Notice) {
        log::info!("Notice [{:?}] {}: {}", notice.severity, notice.title, notice.description);
        self.toasts.push_back(Toast {
            notice,
            shown_at: Instant::now(),
        });
        // Keep only what can be shown
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }
}

impl Component for ToastStack {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width - width;
        let mut bottom = area.y + area.height;

        for toast in self.toasts.iter().rev() {
            if bottom < area.y + TOAST_HEIGHT {
                break;
            }
            let rect = Rect::new(x, bottom - TOAST_HEIGHT, width, TOAST_HEIGHT);
            bottom -= TOAST_HEIGHT;

            let accent = if toast.notice.is_destructive() {
                Color::Red
            } else {
                Color::Cyan
            };
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent));
            let text = vec![
                Line::from(Span::styled(
                    toast.notice.title.as_str(),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                )),
                Line::from(toast.notice.description.as_str()),
            ];

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
                rect,
            );
        }
    }
}
