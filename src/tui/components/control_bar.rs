//! # Control Bar
//!
//! The row of controls under the text area:
//!
//! ```text
//! [⌕ Search ▾]                       [⎘] [ϟ Best ▾] [○] [➤]
//! ```
//!
//! Left group: mode trigger. Right group: attach, model trigger, voice and
//! send. Every control is a [`ChatButton`]; the bar only decides contents,
//! flags and placement.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ControlBarState` keeps hover and last-drawn hit areas between frames
//! - `ControlBar` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::options::{Icon, OptionKey};
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::chat_button::{ButtonSize, ButtonVariant, ChatButton, render_tooltip};
use crate::tui::components::option_menu::BadgeTone;
use crate::tui::icons;

/// Columns between neighbouring controls.
const GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    ModeTrigger,
    Attach,
    ModelTrigger,
    Voice,
    Send,
}

impl Control {
    pub fn tooltip(self) -> &'static str {
        match self {
            Control::ModeTrigger => "Search mode",
            Control::Attach => "Attach File",
            Control::ModelTrigger => "Choose model",
            Control::Voice => "Voice Input",
            Control::Send => "Send (Ctrl+Enter)",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct HitArea {
    control: Control,
    area: Rect,
    disabled: bool,
    tooltip: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct ControlBarState {
    pub hovered: Option<Control>,
    areas: Vec<HitArea>,
}

impl ControlBarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enabled control under the pointer, as drawn last frame.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<Control> {
        self.areas
            .iter()
            .find(|h| !h.disabled && h.area.contains((col, row).into()))
            .map(|h| h.control)
    }

    /// Update the hovered control. Returns true if it changed.
    pub fn hover(&mut self, col: u16, row: u16) -> bool {
        let hovered = self
            .areas
            .iter()
            .find(|h| h.area.contains((col, row).into()))
            .map(|h| h.control);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    /// Where `control` was drawn last frame.
    pub fn area_of(&self, control: Control) -> Option<Rect> {
        self.areas
            .iter()
            .find(|h| h.control == control)
            .map(|h| h.area)
    }
}

/// Transient render wrapper for the control row.
pub struct ControlBar<'a> {
    state: &'a mut ControlBarState,
    app: &'a App,
    can_send: bool,
    pulse: f32,
    show_tooltip: bool,
}

impl<'a> ControlBar<'a> {
    pub fn new(state: &'a mut ControlBarState, app: &'a App, can_send: bool) -> Self {
        Self {
            state,
            app,
            can_send,
            pulse: 0.0,
            show_tooltip: true,
        }
    }

    /// Animation phase in 0.0..=1.0 for the listening indicator.
    pub fn pulse(mut self, pulse: f32) -> Self {
        self.pulse = pulse;
        self
    }

    /// Overlays hide the hover label.
    pub fn show_tooltip(mut self, show: bool) -> Self {
        self.show_tooltip = show;
        self
    }

    fn mode_trigger(&self) -> ChatButton<'static> {
        let entry = self.app.mode.entry();
        let line = Line::from(vec![
            Span::raw(format!(" {} ", icons::glyph(entry.icon))),
            Span::raw(entry.label),
            Span::raw(format!(" {} ", icons::glyph(Icon::ChevronDown))),
        ]);
        ChatButton::new(line)
            .variant(ButtonVariant::Search)
            .as_child(true)
            .tooltip(Control::ModeTrigger.tooltip())
    }

    fn model_trigger(&self) -> ChatButton<'static> {
        let entry = self.app.model.entry();
        let mut spans = vec![
            Span::raw(format!("{} ", icons::glyph(entry.icon))),
            Span::raw(entry.label),
        ];
        if let Some(badge) = entry.badge {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(badge, BadgeTone::Warm.style()));
        }
        spans.push(Span::raw(format!(" {}", icons::glyph(Icon::ChevronDown))));
        ChatButton::new(Line::from(spans))
            .size(ButtonSize::Auto)
            .tooltip(Control::ModelTrigger.tooltip())
    }

    fn voice(&self) -> ChatButton<'static> {
        let listening = self.app.is_listening;
        let content = if listening {
            let beat = if self.pulse > 0.5 {
                Modifier::BOLD
            } else {
                Modifier::DIM
            };
            Span::styled(
                icons::glyph(Icon::MicActive),
                Style::default().add_modifier(beat),
            )
        } else {
            Span::raw(icons::glyph(Icon::Mic))
        };
        ChatButton::new(content)
            .active(listening)
            .tooltip(Control::Voice.tooltip())
    }

    fn send(&self) -> ChatButton<'static> {
        ChatButton::new(icons::glyph(Icon::Send))
            .variant(ButtonVariant::Send)
            .disabled(!self.can_send)
            .tooltip(Control::Send.tooltip())
    }

    fn attach(&self) -> ChatButton<'static> {
        ChatButton::new(icons::glyph(Icon::Paperclip)).tooltip(Control::Attach.tooltip())
    }

    fn place(&mut self, frame: &mut Frame, control: Control, mut button: ChatButton<'static>, area: Rect) {
        let hit = HitArea {
            control,
            area,
            disabled: button.is_disabled(),
            tooltip: button.tooltip_text(),
        };
        button.render(frame, area);
        self.state.areas.push(hit);
    }
}

impl Component for ControlBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.areas.clear();
        if area.height == 0 || area.width == 0 {
            return;
        }
        let row = Rect { height: 1, ..area };

        let left = [(Control::ModeTrigger, self.mode_trigger())];
        let right = [
            (Control::Attach, self.attach()),
            (Control::ModelTrigger, self.model_trigger()),
            (Control::Voice, self.voice()),
            (Control::Send, self.send()),
        ];

        let mut x = row.x;
        for (control, button) in left {
            let width = button.width().min((row.x + row.width).saturating_sub(x));
            if width == 0 {
                break;
            }
            self.place(frame, control, button, Rect::new(x, row.y, width, 1));
            x += width + GAP;
        }
        let left_end = x;

        let right_width: u16 = right.iter().map(|(_, b)| b.width() + GAP).sum::<u16>() - GAP;
        let mut x = (row.x + row.width).saturating_sub(right_width).max(left_end);
        for (control, button) in right {
            let width = button.width().min((row.x + row.width).saturating_sub(x));
            if width == 0 {
                break;
            }
            self.place(frame, control, button, Rect::new(x, row.y, width, 1));
            x += width + GAP;
        }

        if self.show_tooltip
            && let Some(hovered) = self.state.hovered
            && let Some(hit) = self.state.areas.iter().find(|h| h.control == hovered)
            && let Some(text) = hit.tooltip
        {
            let bounds = frame.area();
            render_tooltip(frame, hit.area, text, bounds);
        }
    }
}
