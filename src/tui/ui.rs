use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::action::can_send;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::page_shell::MAX_WIDGET_WIDTH;
use crate::tui::components::{
    BadgeTone, Control, ControlBar, FilePicker, MenuAlign, OptionMenu, PageShell,
};
use crate::tui::{Overlay, TuiState};

/// Rows used by the control bar under the text area.
const CONTROL_ROW_HEIGHT: u16 = 1;

/// Composer height (text area + controls) for a terminal `area`.
fn widget_height(area: Rect, tui: &TuiState) -> u16 {
    let width = MAX_WIDGET_WIDTH.min(area.width.saturating_sub(2));
    tui.input_box.calculate_height(width) + CONTROL_ROW_HEIGHT
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let area = frame.area();

    let mut shell = PageShell::new(widget_height(area, tui));
    shell.render(frame, area);
    let widget = shell.widget_area(area);

    use Constraint::{Length, Min};
    let [input_area, controls_area] =
        Layout::vertical([Min(0), Length(CONTROL_ROW_HEIGHT)]).areas(widget);

    tui.input_box.render(frame, input_area);

    let sendable = can_send(&tui.input_box.buffer, app.is_sending);
    ControlBar::new(&mut tui.control_bar, app, sendable)
        .pulse(tui.pulse_value)
        .show_tooltip(tui.overlay.is_none())
        .render(frame, controls_area);

    draw_overlay(frame, app, tui);

    tui.toasts.render(frame, area);
}

fn draw_overlay(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let bounds = frame.area();
    let mode_anchor = tui.control_bar.area_of(Control::ModeTrigger).unwrap_or_default();
    let model_anchor = tui.control_bar.area_of(Control::ModelTrigger).unwrap_or_default();

    match tui.overlay.as_mut() {
        None => {}
        Some(Overlay::ModeMenu(state)) => {
            OptionMenu::new(state, app.mode, mode_anchor, MenuAlign::Start, BadgeTone::Primary)
                .render(frame, bounds);
        }
        Some(Overlay::ModelMenu(state)) => {
            OptionMenu::new(state, app.model, model_anchor, MenuAlign::Center, BadgeTone::Warm)
                .render(frame, bounds);
        }
        Some(Overlay::FilePicker(state)) => {
            FilePicker::new(state).render(frame, bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notice::{Notice, Notifier};
    use crate::core::options::{Mode, Model};
    use crate::tui::components::OptionMenuState;
    use crate::tui::components::input_box::PLACEHOLDER;
    use crate::tui::components::page_shell::{SUBTITLE, TITLE};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_shows_shell_and_composer() {
        let app = App::new();
        let mut tui = TuiState::new(Duration::from_secs(4));
        let screen = render(&app, &mut tui);
        assert!(screen.contains(TITLE));
        assert!(screen.contains(SUBTITLE));
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains("Search ▾"));
        assert!(screen.contains("Best ▾"));
    }

    #[test]
    fn test_controls_sit_inside_widget_column() {
        let app = App::new();
        let mut tui = TuiState::new(Duration::from_secs(4));
        render(&app, &mut tui);
        let mode = tui.control_bar.area_of(Control::ModeTrigger).unwrap();
        let send = tui.control_bar.area_of(Control::Send).unwrap();
        assert_eq!(mode.x, 14);
        assert_eq!(send.x + send.width, 14 + MAX_WIDGET_WIDTH);
    }

    #[test]
    fn test_growing_draft_grows_widget() {
        let app = App::new();
        let mut tui = TuiState::new(Duration::from_secs(4));
        let area = Rect::new(0, 0, 100, 30);
        let before = widget_height(area, &tui);
        tui.input_box.set_text("line\n".repeat(6));
        assert!(widget_height(area, &tui) > before);
        render(&app, &mut tui);
    }

    #[test]
    fn test_mode_menu_overlay_is_drawn() {
        let app = App::new();
        let mut tui = TuiState::new(Duration::from_secs(4));
        render(&app, &mut tui);
        tui.overlay = Some(Overlay::ModeMenu(OptionMenuState::new(Mode::Search)));
        let screen = render(&app, &mut tui);
        assert!(screen.contains("Research"));
        assert!(screen.contains("Labs"));
    }

    #[test]
    fn test_model_menu_overlay_is_drawn() {
        let app = App::new();
        let mut tui = TuiState::new(Duration::from_secs(4));
        render(&app, &mut tui);
        tui.overlay = Some(Overlay::ModelMenu(OptionMenuState::new(Model::Best)));
        let screen = render(&app, &mut tui);
        assert!(screen.contains("GPT-5"));
        assert!(screen.contains("o3-pro"));
    }

    #[test]
    fn test_toasts_drawn_on_top() {
        let app = App::new();
        let mut tui = TuiState::new(Duration::from_secs(4));
        tui.toasts.notify(Notice::normal("Message sent", "\"hi\""));
        let screen = render(&app, &mut tui);
        assert!(screen.contains("Message sent"));
    }
}
