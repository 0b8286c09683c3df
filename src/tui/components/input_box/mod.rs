//! # InputBox Component
//!
//! The composer's text area: holds the draft message and its cursor.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing (backspace, delete, cursor and word
//!   movement, bracketed paste)
//! - Plain Enter inserts a newline; Ctrl+Enter hands the draft off for sending
//! - Auto-fit its height to the wrapped content between
//!   `MIN_VISIBLE_LINES` and `MAX_VISIBLE_LINES`, then scroll internally
//! - Show a placeholder while empty
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `disabled` (a send is in flight)
//! and `focused` (no overlay is open) are props set by the parent each frame.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{
    Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::core::action::can_send;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    MAX_VISIBLE_LINES, MIN_VISIBLE_LINES, VERTICAL_OVERHEAD, WrapLayout, inner_width,
    next_char_boundary, next_word_end, prev_char_boundary, prev_word_start, row_count,
};

pub const PLACEHOLDER: &str = "Ask anything or @mention a Space";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The draft was taken for sending (Ctrl+Enter); the buffer is now empty.
    Submit(String),
    /// Text or cursor changed.
    ContentChanged,
}

/// Auto-growing text area.
///
/// # Props
///
/// - `disabled`: a send is in flight; edits and submission are ignored
/// - `focused`: the box owns the terminal cursor
pub struct InputBox {
    /// Draft message (Internal State)
    pub buffer: String,
    /// Send in flight (Prop)
    pub disabled: bool,
    /// Cursor visible (Prop)
    pub focused: bool,
    /// Cursor byte offset into `buffer`
    pos: usize,
    /// First visible row
    scroll_offset: u16,
    /// Inner width from the last render, used for vertical movement
    last_width: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    const DEFAULT_WIDTH: u16 = 76;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            focused: true,
            pos: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// Replace the whole draft, cursor at the end.
    pub fn set_text(&mut self, text: String) {
        self.buffer = text;
        self.pos = self.buffer.len();
        self.scroll_offset = 0;
    }

    /// Take the draft if it can be sent, leaving the box empty.
    pub fn submit(&mut self) -> Option<String> {
        if !can_send(&self.buffer, self.disabled) {
            return None;
        }
        let text = std::mem::take(&mut self.buffer);
        self.pos = 0;
        self.scroll_offset = 0;
        Some(text)
    }

    /// Height for the current content at `outer_width`, borders included.
    /// Always within [MIN_VISIBLE_LINES, MAX_VISIBLE_LINES] + VERTICAL_OVERHEAD.
    pub fn calculate_height(&self, outer_width: u16) -> u16 {
        let rows = row_count(&self.buffer, inner_width(outer_width));
        rows.clamp(MIN_VISIBLE_LINES, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.pos, text);
        self.pos += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (pos != self.pos).then(|| {
            self.pos = pos;
            InputEvent::ContentChanged
        })
    }

    fn move_vertically(&mut self, down: bool) -> Option<InputEvent> {
        let layout = WrapLayout::new(&self.buffer, self.last_width);
        let (col, _) = layout.cursor_cell(&self.buffer, self.pos);
        let row = layout.row_of(self.pos);
        let target = if down {
            let next = row + 1;
            if next >= layout.rows().len() {
                return None;
            }
            next
        } else {
            row.checked_sub(1)?
        };
        let pos = layout.pos_at(&self.buffer, target, col);
        self.move_to(pos)
    }

    /// Keep the cursor row inside the visible window.
    fn update_scroll(&mut self, layout: &WrapLayout, visible: u16) {
        let (_, row) = layout.cursor_cell(&self.buffer, self.pos);
        let max_offset = layout.row_count().saturating_sub(visible);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset.saturating_add(visible) {
            self.scroll_offset = row.saturating_add(1).saturating_sub(visible);
        }
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));
        if self.disabled {
            block = block.title(" Sending… ");
        }

        let inner = block.inner(area);
        self.last_width = inner.width;
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.buffer.is_empty() {
            self.scroll_offset = 0;
            let placeholder = Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(placeholder, inner);
        } else {
            let layout = WrapLayout::new(&self.buffer, inner.width);
            self.update_scroll(&layout, inner.height);

            let lines: Vec<Line> = layout
                .rows()
                .iter()
                .skip(self.scroll_offset as usize)
                .take(inner.height as usize)
                .map(|r| Line::raw(&self.buffer[r.clone()]))
                .collect();
            let mut style = Style::default().fg(Color::White);
            if self.disabled {
                style = style.add_modifier(Modifier::DIM);
            }
            frame.render_widget(Paragraph::new(lines).style(style), inner);

            if layout.row_count() > inner.height {
                let mut scrollbar_state = ScrollbarState::default()
                    .content_length(layout.row_count().saturating_sub(inner.height) as usize)
                    .position(self.scroll_offset as usize);
                let scrollbar_area = Rect {
                    x: area.x + area.width.saturating_sub(1),
                    y: area.y + 1,
                    width: 1,
                    height: area.height.saturating_sub(2),
                };
                frame.render_stateful_widget(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight),
                    scrollbar_area,
                    &mut scrollbar_state,
                );
            }
        }

        if self.focused && !self.disabled {
            let layout = WrapLayout::new(&self.buffer, inner.width);
            let (col, row) = layout.cursor_cell(&self.buffer, self.pos);
            let x = inner.x + col.min(inner.width - 1);
            let y = inner.y + row.saturating_sub(self.scroll_offset).min(inner.height - 1);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp))
            }
            TuiEvent::Enter => self.insert("\n"),
            TuiEvent::Paste(text) => {
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert(&normalized)
            }
            TuiEvent::Backspace => {
                if self.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(self.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self.move_to(prev_char_boundary(&self.buffer, self.pos)),
            TuiEvent::CursorRight => self.move_to(next_char_boundary(&self.buffer, self.pos)),
            TuiEvent::WordLeft => self.move_to(prev_word_start(&self.buffer, self.pos)),
            TuiEvent::WordRight => self.move_to(next_word_end(&self.buffer, self.pos)),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.pos].rfind('\n').map_or(0, |i| i + 1);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.pos..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.pos + i);
                self.move_to(line_end)
            }
            TuiEvent::CursorUp => self.move_vertically(false),
            TuiEvent::CursorDown => self.move_vertically(true),
            TuiEvent::Send => self.submit().map(InputEvent::Submit),
            _ => None,
        }
    }
}
