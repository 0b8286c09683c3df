//! # Application State
//!
//! Core state of the composer. Domain data only; the draft text itself lives
//! in the TUI's input box next to its cursor, and presentation state (open
//! menus, hover, toasts) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── mode: Mode           // selected search mode
//! ├── model: Model         // selected model
//! ├── is_sending: bool     // simulated send in flight
//! ├── voice_pending: bool  // recognizer spawned, not yet started
//! └── is_listening: bool   // voice capture in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::options::{Mode, Model};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct App {
    pub mode: Mode,
    pub model: Model,
    pub is_sending: bool,
    /// Set when a recognizer is requested, cleared once it reports back.
    pub voice_pending: bool,
    pub is_listening: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            mode: config.mode,
            model: config.model,
            ..Self::default()
        }
    }
}
