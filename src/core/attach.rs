//! # Attachments
//!
//! Picker configuration and the acknowledgement shown after a selection.
//! Chosen files are never opened, read, or uploaded.

use std::path::Path;

use crate::core::notice::Notice;

/// Extensions the file picker offers, lowercase, with the leading dot.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    ".txt", ".pdf", ".doc", ".docx", ".md", ".py", ".js", ".html", ".css", ".json", ".csv",
    ".xlsx",
];

/// How the file picker should behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerOptions {
    pub multiple: bool,
    pub accept: &'static [&'static str],
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            multiple: true,
            accept: ACCEPTED_EXTENSIONS,
        }
    }
}

impl PickerOptions {
    /// Whether `path` has one of the accepted extensions (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{}", ext.to_ascii_lowercase());
        self.accept.contains(&dotted.as_str())
    }
}

/// Notice acknowledging a selection, or `None` when nothing was chosen.
pub fn attached_notice(names: &[String]) -> Option<Notice> {
    if names.is_empty() {
        return None;
    }
    Some(Notice::normal(
        "Files attached",
        format!("{} file(s): {}", names.len(), names.join(", ")),
    ))
}
