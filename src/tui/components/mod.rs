//! # TUI Components
//!
//! This module contains all UI components for the composer.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `ChatButton`: the shared control primitive
//! - `PageShell`: title, subtitle and the centered widget column
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state between frames and emit events:
//! - `InputBox`: the auto-growing text area
//! - `ControlBar`: hover and hit areas for the row of controls
//! - `OptionMenu`: mode and model dropdowns
//! - `FilePicker`: the attach overlay
//! - `ToastStack`: transient notices
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields or constructor
//! arguments), not by reaching into global state:
//!
//! ```rust,ignore
//! // Good: the send flag is passed in
//! ControlBar::new(&mut tui.control_bar, app, can_send).render(frame, area);
//!
//! // Bad: hidden dependency on App
//! control_bar.render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── chat_button.rs   (control primitive + tooltip)
//! ├── control_bar.rs   (mode/attach/model/voice/send row)
//! ├── file_picker.rs   (attach overlay)
//! ├── input_box/       (text area and its row layout)
//! ├── option_menu.rs   (mode and model dropdowns)
//! ├── page_shell.rs    (title, subtitle, centered column)
//! └── toast.rs         (notice stack)
//! ```

pub mod chat_button;
pub mod control_bar;
pub mod file_picker;
pub mod input_box;
pub mod option_menu;
pub mod page_shell;
pub mod toast;

pub use control_bar::{Control, ControlBar, ControlBarState};
pub use file_picker::{FilePicker, FilePickerState, PickerEvent};
pub use input_box::{InputBox, InputEvent};
pub use option_menu::{BadgeTone, MenuAlign, MenuEvent, OptionMenu, OptionMenuState};
pub use page_shell::PageShell;
pub use toast::ToastStack;
