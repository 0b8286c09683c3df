//! # Core Application Logic
//!
//! The composer's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (selection,    │
//!                    │    sending, listening)  │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                     ┌──────────┴──────────┐
//!                     ▼                     ▼
//!              ┌────────────┐        ┌────────────┐
//!              │    TUI     │        │   Speech   │
//!              │  Adapter   │        │ recognizer │
//!              │ (ratatui)  │        │  (tokio)   │
//!              └────────────┘        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, composer state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`options`]: Mode and model registries
//! - [`notice`]: User-facing notifications
//! - [`attach`]: File picker options and acknowledgement
//! - [`config`]: Layered configuration

pub mod action;
pub mod attach;
pub mod config;
pub mod notice;
pub mod options;
pub mod state;
