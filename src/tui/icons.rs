//! Terminal glyphs for the core's icon references.
//!
//! Every glyph is a single narrow cell so widths stay predictable.

use crate::core::options::Icon;

pub fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Search => "⌕",
        Icon::Microscope => "◎",
        Icon::Lightbulb => "✦",
        Icon::Brain => "◈",
        Icon::Zap => "ϟ",
        Icon::Paperclip => "⎘",
        Icon::Mic => "○",
        Icon::MicActive => "●",
        Icon::Send => "➤",
        Icon::ChevronDown => "▾",
    }
}
