//! # Option Menu Component
//!
//! Dropdown listing every entry of a registry (modes or models) above its
//! trigger. Each row shows icon, label, badge and description; the current
//! selection carries a `●`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `OptionMenuState<K>` lives in `TuiState` while the menu is open
//! - `OptionMenu<K>` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};
use unicode_width::UnicodeWidthStr;

use crate::core::options::{OptionEntry, OptionKey};
use crate::tui::event::TuiEvent;
use crate::tui::icons;

/// Menu width in columns, borders included.
const MENU_WIDTH: u16 = 40;
/// Each entry is a label line plus a description line.
const ROWS_PER_ENTRY: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAlign {
    /// Left edge lines up with the trigger.
    Start,
    /// Centered over the trigger.
    Center,
}

/// How badges are colored in this menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Primary,
    Warm,
}

impl BadgeTone {
    pub fn style(self) -> Style {
        match self {
            BadgeTone::Primary => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            BadgeTone::Warm => Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Events emitted by the option menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent<K> {
    Select(K),
    Dismiss,
}

/// Persistent state for an open menu.
pub struct OptionMenuState<K: OptionKey> {
    pub highlighted: usize,
    pub list_state: ListState,
    /// Where the list was drawn last frame (for mouse hit-testing).
    last_list_area: Option<Rect>,
    _key: std::marker::PhantomData<K>,
}

impl<K: OptionKey> OptionMenuState<K> {
    /// Open with the highlight on the current selection.
    pub fn new(current: K) -> Self {
        let highlighted = K::all().iter().position(|k| *k == current).unwrap_or(0);
        let mut list_state = ListState::default();
        list_state.select(Some(highlighted));
        Self {
            highlighted,
            list_state,
            last_list_area: None,
            _key: std::marker::PhantomData,
        }
    }

    /// Handle a key event, returning a MenuEvent if the menu should close.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<MenuEvent<K>> {
        let count = K::all().len();
        match event {
            TuiEvent::Escape => Some(MenuEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
                self.list_state.select(Some(self.highlighted));
                None
            }
            TuiEvent::CursorDown => {
                self.highlighted = (self.highlighted + 1).min(count - 1);
                self.list_state.select(Some(self.highlighted));
                None
            }
            TuiEvent::Enter => K::all().get(self.highlighted).copied().map(MenuEvent::Select),
            TuiEvent::MouseClick(col, row) => Some(self.handle_click(*col, *row)),
            _ => None,
        }
    }

    /// A click on an entry selects it; a click anywhere else dismisses.
    fn handle_click(&self, col: u16, row: u16) -> MenuEvent<K> {
        let Some(area) = self.last_list_area else {
            return MenuEvent::Dismiss;
        };
        if !area.contains((col, row).into()) {
            return MenuEvent::Dismiss;
        }
        let offset = self.list_state.offset();
        let index = offset + ((row - area.y) / ROWS_PER_ENTRY) as usize;
        K::all()
            .get(index)
            .copied()
            .map_or(MenuEvent::Dismiss, MenuEvent::Select)
    }
}

/// Transient render wrapper for an open menu.
pub struct OptionMenu<'a, K: OptionKey> {
    state: &'a mut OptionMenuState<K>,
    current: K,
    anchor: Rect,
    align: MenuAlign,
    badge_tone: BadgeTone,
}

impl<'a, K: OptionKey> OptionMenu<'a, K> {
    pub fn new(
        state: &'a mut OptionMenuState<K>,
        current: K,
        anchor: Rect,
        align: MenuAlign,
        badge_tone: BadgeTone,
    ) -> Self {
        Self {
            state,
            current,
            anchor,
            align,
            badge_tone,
        }
    }

    /// Where the menu goes: above the anchor when it fits, otherwise below.
    pub fn placement(&self, bounds: Rect) -> Rect {
        let width = MENU_WIDTH.min(bounds.width);
        let wanted = K::all().len() as u16 * ROWS_PER_ENTRY + 2;

        let room_above = self.anchor.y.saturating_sub(bounds.y);
        let room_below = (bounds.y + bounds.height).saturating_sub(self.anchor.y + 1);
        let (y, height) = if room_above >= wanted || room_above >= room_below {
            let h = wanted.min(room_above);
            (self.anchor.y - h, h)
        } else {
            (self.anchor.y + 1, wanted.min(room_below))
        };

        let preferred_x = match self.align {
            MenuAlign::Start => self.anchor.x,
            MenuAlign::Center => (self.anchor.x + self.anchor.width / 2).saturating_sub(width / 2),
        };
        let max_x = bounds.x + bounds.width - width;
        let x = preferred_x.clamp(bounds.x, max_x);

        Rect::new(x, y, width, height)
    }

    pub fn render(&mut self, frame: &mut Frame, bounds: Rect) {
        let area = self.placement(bounds);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        self.state.last_list_area = Some(inner);

        let items: Vec<ListItem> = K::all()
            .iter()
            .map(|key| {
                entry_item(
                    key.entry(),
                    *key == self.current,
                    inner.width,
                    self.badge_tone,
                )
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Two-line list item for one entry.
fn entry_item(entry: &OptionEntry, is_current: bool, width: u16, tone: BadgeTone) -> ListItem<'static> {
    let mut head = vec![
        Span::raw(format!("{} ", icons::glyph(entry.icon))),
        Span::styled(entry.label, Style::default().add_modifier(Modifier::BOLD)),
    ];
    if let Some(badge) = entry.badge {
        head.push(Span::raw(" "));
        head.push(Span::styled(badge, tone.style()));
    }
    if is_current {
        let used: usize = head.iter().map(|s| s.content.width()).sum();
        let pad = (width as usize).saturating_sub(used + 1);
        head.push(Span::raw(" ".repeat(pad)));
        head.push(Span::styled("●", Style::default().fg(Color::Cyan)));
    }

    let description = Line::from(Span::styled(
        format!("  {}", entry.description),
        Style::default().fg(Color::DarkGray),
    ));

    ListItem::new(vec![Line::from(head), description])
}
