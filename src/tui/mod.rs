//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the composer,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! ```text
//! TuiEvent ─► overlay open? ─yes─► menu / picker ─► Action
//!                 │
//!                 no
//!                 ├─► control shortcut or click ─► activate(Control) ─► Action
//!                 └─► InputBox ─► InputEvent::Submit ─► Action::Send
//!
//! Action ─► update() ─► Effect ─► apply_effect() (tasks, toasts, draft)
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Animating** (sending, listening): draws every ~80ms for the pulse.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background actions
//!   or when a toast expires.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod icons;
mod tasks;
mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::attach::PickerOptions;
use crate::core::config::ResolvedConfig;
use crate::core::notice::Notifier;
use crate::core::options::{Mode, Model};
use crate::core::state::App;
use crate::speech::{CommandCapability, RecognitionSettings, SpeechCapability, SpeechEvent};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    Control, ControlBarState, FilePickerState, InputBox, InputEvent, MenuEvent, OptionMenuState,
    PickerEvent, ToastStack,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// At most one overlay is open at a time.
pub enum Overlay {
    ModeMenu(OptionMenuState<Mode>),
    ModelMenu(OptionMenuState<Model>),
    FilePicker(FilePickerState),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub input_box: InputBox,
    pub control_bar: ControlBarState,
    pub overlay: Option<Overlay>,
    pub toasts: ToastStack,
    // Animation state
    pub pulse_value: f32,
}

impl TuiState {
    pub fn new(toast_lifetime: Duration) -> Self {
        Self {
            input_box: InputBox::new(),
            control_bar: ControlBarState::new(),
            overlay: None,
            toasts: ToastStack::new(toast_lifetime),
            pulse_value: 0.0,
        }
    }
}

/// Collaborators the loop hands to the routing functions.
pub struct Services {
    pub speech: Box<dyn SpeechCapability>,
    pub attach_dir: PathBuf,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Ctrl+Enter arrive as its own key; the
        // protocol is ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Push App state into InputBox props.
fn sync_props(app: &App, tui: &mut TuiState) {
    tui.input_box.disabled = app.is_sending;
    tui.input_box.focused = tui.overlay.is_none();
}

/// Route one terminal event. UI-only changes (hover, opening overlays) happen
/// here; anything touching App comes back as an Action.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent, services: &Services) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if let Some(overlay) = tui.overlay.as_mut() {
        let outcome = route_overlay_event(overlay, &event)?;
        tui.overlay = None;
        return outcome;
    }

    match event {
        TuiEvent::Resize | TuiEvent::Escape => None,
        TuiEvent::MouseMove(col, row) => {
            tui.control_bar.hover(col, row);
            None
        }
        TuiEvent::MouseClick(col, row) => {
            let control = tui.control_bar.hit_test(col, row)?;
            activate(app, tui, control, services)
        }
        TuiEvent::OpenModeMenu => activate(app, tui, Control::ModeTrigger, services),
        TuiEvent::OpenModelMenu => activate(app, tui, Control::ModelTrigger, services),
        TuiEvent::Attach => activate(app, tui, Control::Attach, services),
        TuiEvent::Voice => activate(app, tui, Control::Voice, services),
        other => match tui.input_box.handle_event(&other)? {
            InputEvent::Submit(text) => Some(Action::Send(text)),
            InputEvent::ContentChanged => None,
        },
    }
}

/// Feed an event to the open overlay. `Some(outcome)` means the overlay
/// closes, with an optional Action to dispatch.
fn route_overlay_event(overlay: &mut Overlay, event: &TuiEvent) -> Option<Option<Action>> {
    match overlay {
        Overlay::ModeMenu(menu) => match menu.handle_event(event)? {
            MenuEvent::Select(mode) => Some(Some(Action::SelectMode(mode))),
            MenuEvent::Dismiss => Some(None),
        },
        Overlay::ModelMenu(menu) => match menu.handle_event(event)? {
            MenuEvent::Select(model) => Some(Some(Action::SelectModel(model))),
            MenuEvent::Dismiss => Some(None),
        },
        Overlay::FilePicker(picker) => match picker.handle_event(event)? {
            PickerEvent::Confirm(names) => Some(Some(Action::FilesChosen(names))),
            PickerEvent::Cancel => Some(None),
        },
    }
}

/// Press a control.
fn activate(app: &App, tui: &mut TuiState, control: Control, services: &Services) -> Option<Action> {
    debug!("Activate {:?}", control);
    match control {
        Control::ModeTrigger => {
            tui.overlay = Some(Overlay::ModeMenu(OptionMenuState::new(app.mode)));
            None
        }
        Control::ModelTrigger => {
            tui.overlay = Some(Overlay::ModelMenu(OptionMenuState::new(app.model)));
            None
        }
        Control::Attach => {
            let picker = FilePickerState::open(PickerOptions::default(), &services.attach_dir);
            tui.overlay = Some(Overlay::FilePicker(picker));
            None
        }
        Control::Voice => Some(Action::VoiceRequested {
            supported: services.speech.recognizer().is_some(),
        }),
        Control::Send => tui.input_box.submit().map(Action::Send),
    }
}

/// Carry out an Effect. Returns true when the loop should exit.
fn apply_effect(effect: Effect, tui: &mut TuiState, tx: &mpsc::Sender<Action>, services: &Services) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::SpawnSend(text) => {
            tasks::spawn_send(text, tx.clone());
        }
        Effect::StartVoice => match services.speech.recognizer() {
            Some(recognizer) => {
                tasks::spawn_voice(recognizer, RecognitionSettings::default(), tx.clone());
            }
            None => {
                warn!("Speech recognizer disappeared before start");
                let _ = tx.send(Action::Voice(SpeechEvent::Ended));
            }
        },
        Effect::Notify(notice) => tui.toasts.notify(notice),
        Effect::ReplaceDraft(text) => tui.input_box.set_text(text),
    }
    false
}

/// Run an action through the reducer and apply the result.
fn dispatch(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    tx: &mpsc::Sender<Action>,
    services: &Services,
) -> bool {
    let effect = update(app, action);
    let quit = apply_effect(effect, tui, tx, services);
    sync_props(app, tui);
    quit
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(config.toast_duration);
    let services = Services {
        speech: Box::new(CommandCapability::new(config.voice_command.clone())),
        attach_dir: config.attach_start_dir.clone(),
    };
    info!(
        "Composer starting (mode: {:?}, model: {:?}, voice: {})",
        app.mode,
        app.model,
        config.voice_command.as_deref().unwrap_or("none")
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        sync_props(&app, &mut tui);

        let animating = app.is_sending || app.is_listening;
        if animating {
            needs_redraw = true;
        }
        if tui.toasts.prune(Instant::now()) {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, event, &services)
                && dispatch(&mut app, &mut tui, action, &tx, &services)
            {
                break 'main;
            }
            sync_props(&app, &mut tui);
        }

        // Handle background task actions (send outcomes, speech events)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, &mut tui, action, &tx, &services) {
                break 'main;
            }
        }
    }

    info!("Composer shutting down");
    ratatui::restore();
    Ok(())
}
