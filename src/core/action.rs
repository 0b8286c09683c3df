//! # Actions
//!
//! Everything that can happen in the composer becomes an `Action`.
//! User presses Ctrl+Enter? That's `Action::Send(text)`.
//! The simulated delay elapses? That's `Action::SendSucceeded(text)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing the I/O the adapter should do.
//! No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Two small state machines live here:
//!
//! ```text
//! send:   Idle ──Send──► Sending ──SendSucceeded | SendFailed──► Idle
//! voice:  Idle ──VoiceRequested──► Pending ──Started──► Listening ──Ended | Error──► Idle
//! ```

use log::debug;

use crate::core::attach::attached_notice;
use crate::core::notice::{self, Notice};
use crate::core::options::{Mode, Model};
use crate::core::state::App;
use crate::speech::SpeechEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The draft was taken from the input box and should be sent.
    Send(String),
    /// The simulated send finished; carries the original text.
    SendSucceeded(String),
    /// The send task failed before completing.
    SendFailed(String),
    SelectMode(Mode),
    SelectModel(Model),
    /// The file picker was confirmed with these file names.
    FilesChosen(Vec<String>),
    /// The user asked for voice input; `supported` is the capability probe.
    VoiceRequested { supported: bool },
    /// Lifecycle event from a running recognizer.
    Voice(SpeechEvent),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Start the simulated send of this text.
    SpawnSend(String),
    /// Start a recognition session.
    StartVoice,
    /// Show a notice.
    Notify(Notice),
    /// Replace the whole draft with this text.
    ReplaceDraft(String),
}

/// Send is allowed for non-blank text while no other send is in flight.
pub fn can_send(draft: &str, is_sending: bool) -> bool {
    !draft.trim().is_empty() && !is_sending
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Send(text) => {
            if !can_send(&text, app.is_sending) {
                debug!("Send ignored (blank draft or send in flight)");
                return Effect::None;
            }
            app.is_sending = true;
            Effect::SpawnSend(text)
        }
        Action::SendSucceeded(text) => {
            app.is_sending = false;
            Effect::Notify(notice::message_sent(&text))
        }
        Action::SendFailed(reason) => {
            debug!("Send failed: {}", reason);
            app.is_sending = false;
            Effect::Notify(notice::send_failed())
        }
        Action::SelectMode(mode) => {
            app.mode = mode;
            Effect::None
        }
        Action::SelectModel(model) => {
            app.model = model;
            Effect::None
        }
        Action::FilesChosen(names) => match attached_notice(&names) {
            Some(n) => Effect::Notify(n),
            None => Effect::None,
        },
        Action::VoiceRequested { supported } => {
            if !supported {
                return Effect::Notify(notice::voice_unsupported());
            }
            if app.is_listening || app.voice_pending {
                debug!("Voice request ignored, recognizer already running");
                return Effect::None;
            }
            app.voice_pending = true;
            Effect::StartVoice
        }
        Action::Voice(event) => match event {
            SpeechEvent::Started => {
                app.voice_pending = false;
                app.is_listening = true;
                Effect::None
            }
            SpeechEvent::Result(transcript) => Effect::ReplaceDraft(transcript),
            SpeechEvent::Error(_) => {
                app.voice_pending = false;
                app.is_listening = false;
                Effect::Notify(notice::voice_error())
            }
            SpeechEvent::Ended => {
                app.voice_pending = false;
                app.is_listening = false;
                Effect::None
            }
        },
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notice::Severity;

    fn notice_of(effect: Effect) -> Notice {
        match effect {
            Effect::Notify(n) => n,
            other => panic!("Expected Notify, got {:?}", other),
        }
    }

    #[test]
    fn test_can_send_requires_non_blank_text() {
        assert!(can_send("hi", false));
        assert!(can_send("  x  ", false));
        assert!(!can_send("", false));
        assert!(!can_send(" \n\t ", false));
    }

    #[test]
    fn test_can_send_blocked_while_sending() {
        assert!(!can_send("hi", true));
    }

    #[test]
    fn test_send_enters_sending_state() {
        let mut app = App::new();
        let effect = update(&mut app, Action::Send("Hello world".to_string()));
        assert_eq!(effect, Effect::SpawnSend("Hello world".to_string()));
        assert!(app.is_sending);
    }

    #[test]
    fn test_send_ignored_when_blank_or_busy() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Send("   ".to_string())), Effect::None);
        assert!(!app.is_sending);

        app.is_sending = true;
        assert_eq!(update(&mut app, Action::Send("again".to_string())), Effect::None);
        assert!(app.is_sending);
    }

    #[test]
    fn test_send_success_returns_to_idle_with_preview() {
        let mut app = App::new();
        update(&mut app, Action::Send("Hello world".to_string()));
        let notice = notice_of(update(&mut app, Action::SendSucceeded("Hello world".to_string())));
        assert!(!app.is_sending);
        assert_eq!(notice.description, "\"Hello world\"");
        assert_eq!(notice.severity, Severity::Normal);
    }

    #[test]
    fn test_send_success_truncates_long_text() {
        let mut app = App::new();
        let text = "0123456789".repeat(6);
        let notice = notice_of(update(&mut app, Action::SendSucceeded(text.clone())));
        assert_eq!(notice.description, format!("\"{}...\"", &text[..50]));
    }

    #[test]
    fn test_send_failure_is_destructive_and_idle() {
        let mut app = App::new();
        app.is_sending = true;
        let notice = notice_of(update(&mut app, Action::SendFailed("panic".to_string())));
        assert!(!app.is_sending);
        assert_eq!(notice.severity, Severity::Destructive);
        assert_eq!(notice.description, "Failed to send message");
    }

    #[test]
    fn test_selecting_mode_leaves_model_untouched() {
        let mut app = App::new();
        app.model = Model::Sonar;
        for mode in Mode::ALL {
            assert_eq!(update(&mut app, Action::SelectMode(mode)), Effect::None);
            assert_eq!(app.mode, mode);
            assert_eq!(app.model, Model::Sonar);
        }
    }

    #[test]
    fn test_selecting_model_leaves_mode_untouched() {
        let mut app = App::new();
        app.mode = Mode::Labs;
        for model in Model::ALL {
            update(&mut app, Action::SelectModel(model));
            assert_eq!(app.model, model);
            assert_eq!(app.mode, Mode::Labs);
        }
    }

    #[test]
    fn test_files_chosen_notice() {
        let mut app = App::new();
        let names = vec!["a.txt".to_string(), "b.pdf".to_string()];
        let notice = notice_of(update(&mut app, Action::FilesChosen(names)));
        assert_eq!(notice.description, "2 file(s): a.txt, b.pdf");
    }

    #[test]
    fn test_no_files_no_notice() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::FilesChosen(vec![])), Effect::None);
    }

    #[test]
    fn test_voice_unsupported_notifies_without_state_change() {
        let mut app = App::new();
        let before = app.clone();
        let notice = notice_of(update(&mut app, Action::VoiceRequested { supported: false }));
        assert_eq!(notice.title, "Not supported");
        assert_eq!(notice.severity, Severity::Normal);
        assert_eq!(app, before);
    }

    #[test]
    fn test_voice_supported_starts_capture() {
        let mut app = App::new();
        assert_eq!(
            update(&mut app, Action::VoiceRequested { supported: true }),
            Effect::StartVoice
        );
        // Listening only begins when the recognizer reports it
        assert!(!app.is_listening);
        assert!(app.voice_pending);
    }

    #[test]
    fn test_second_voice_request_before_start_is_ignored() {
        let mut app = App::new();
        let first = update(&mut app, Action::VoiceRequested { supported: true });
        let second = update(&mut app, Action::VoiceRequested { supported: true });
        assert_eq!(first, Effect::StartVoice);
        assert_eq!(second, Effect::None);

        update(&mut app, Action::Voice(SpeechEvent::Started));
        assert!(!app.voice_pending);
        assert_eq!(
            update(&mut app, Action::VoiceRequested { supported: true }),
            Effect::None
        );
    }

    #[test]
    fn test_voice_request_allowed_again_after_end() {
        let mut app = App::new();
        update(&mut app, Action::VoiceRequested { supported: true });
        update(&mut app, Action::Voice(SpeechEvent::Error("spawn".to_string())));
        update(&mut app, Action::Voice(SpeechEvent::Ended));
        assert!(!app.voice_pending);
        assert_eq!(
            update(&mut app, Action::VoiceRequested { supported: true }),
            Effect::StartVoice
        );
    }

    #[test]
    fn test_voice_request_ignored_while_listening() {
        let mut app = App::new();
        app.is_listening = true;
        assert_eq!(
            update(&mut app, Action::VoiceRequested { supported: true }),
            Effect::None
        );
    }

    #[test]
    fn test_voice_lifecycle_success() {
        let mut app = App::new();
        update(&mut app, Action::Voice(SpeechEvent::Started));
        assert!(app.is_listening);

        let effect = update(
            &mut app,
            Action::Voice(SpeechEvent::Result("turn on the lights".to_string())),
        );
        assert_eq!(effect, Effect::ReplaceDraft("turn on the lights".to_string()));

        update(&mut app, Action::Voice(SpeechEvent::Ended));
        assert!(!app.is_listening);
    }

    #[test]
    fn test_voice_error_clears_listening() {
        let mut app = App::new();
        update(&mut app, Action::Voice(SpeechEvent::Started));
        let notice = notice_of(update(
            &mut app,
            Action::Voice(SpeechEvent::Error("no mic".to_string())),
        ));
        assert!(!app.is_listening);
        assert_eq!(notice.title, "Voice recognition error");
        assert_eq!(notice.severity, Severity::Destructive);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
