//! # Notices
//!
//! Short-lived, user-facing notifications. The core only builds them; an
//! adapter that implements [`Notifier`] decides how and for how long they are
//! shown (the TUI uses a toast stack).

use uuid::Uuid;

/// Number of characters of a sent message echoed back in the confirmation.
pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Normal,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Normal)
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Destructive)
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Anything that can surface a notice to the user. Fire-and-forget.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// First [`PREVIEW_CHARS`] characters of `message`, with `...` appended when
/// anything was cut.
pub fn preview(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

pub fn message_sent(message: &str) -> Notice {
    Notice::normal("Message sent", format!("\"{}\"", preview(message)))
}

pub fn send_failed() -> Notice {
    Notice::destructive("Error", "Failed to send message")
}

pub fn voice_unsupported() -> Notice {
    Notice::normal(
        "Not supported",
        "Speech recognition is not supported in your terminal",
    )
}

pub fn voice_error() -> Notice {
    Notice::destructive(
        "Voice recognition error",
        "Please try again or type your message",
    )
}
