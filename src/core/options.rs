//! # Option Registries
//!
//! The two static, ordered tables the composer selects from before sending:
//! search modes and models. Each registry is an enum so that every lookup is
//! exhaustive, with `ALL` fixing the display order.
//!
//! ```text
//! Mode::ALL   = [Search, Research, Labs]
//! Model::ALL  = [Best, Sonar, ClaudeSonnet4, ClaudeOpus4, Gpt5, O3Pro]
//! ```
//!
//! Entries are `'static` and never mutated at runtime.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Icon references used by option entries and controls.
///
/// The core only names icons; the TUI decides how each one is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Search,
    Microscope,
    Lightbulb,
    Brain,
    Zap,
    Paperclip,
    Mic,
    MicActive,
    Send,
    ChevronDown,
}

/// Immutable description of one selectable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEntry {
    pub label: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    pub badge: Option<&'static str>,
}

/// Shared behaviour of both registries, used by the generic dropdown menu.
pub trait OptionKey: Copy + PartialEq + std::fmt::Debug + 'static {
    /// Every key in registry order.
    fn all() -> &'static [Self];
    /// The entry this key maps to.
    fn entry(self) -> &'static OptionEntry;
}

// ============================================================================
// Modes
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Search,
    Research,
    Labs,
}

const SEARCH: OptionEntry = OptionEntry {
    label: "Search",
    description: "Fast answers to everyday questions",
    icon: Icon::Search,
    badge: Some("PRO"),
};

const RESEARCH: OptionEntry = OptionEntry {
    label: "Research",
    description: "Deep research on any topic",
    icon: Icon::Microscope,
    badge: Some("PRO"),
};

const LABS: OptionEntry = OptionEntry {
    label: "Labs",
    description: "Create projects from scratch",
    icon: Icon::Lightbulb,
    badge: Some("PRO"),
};

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Search, Mode::Research, Mode::Labs];
}

impl OptionKey for Mode {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn entry(self) -> &'static OptionEntry {
        match self {
            Mode::Search => &SEARCH,
            Mode::Research => &RESEARCH,
            Mode::Labs => &LABS,
        }
    }
}

// ============================================================================
// Models
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
pub enum Model {
    #[default]
    #[serde(rename = "best")]
    #[value(name = "best")]
    Best,
    #[serde(rename = "sonar")]
    #[value(name = "sonar")]
    Sonar,
    #[serde(rename = "claude-sonnet-4")]
    #[value(name = "claude-sonnet-4")]
    ClaudeSonnet4,
    #[serde(rename = "claude-opus-4")]
    #[value(name = "claude-opus-4")]
    ClaudeOpus4,
    #[serde(rename = "gpt-5")]
    #[value(name = "gpt-5")]
    Gpt5,
    #[serde(rename = "o3-pro")]
    #[value(name = "o3-pro")]
    O3Pro,
}

const BEST: OptionEntry = OptionEntry {
    label: "Best",
    description: "Optimal model selection",
    icon: Icon::Zap,
    badge: None,
};

const SONAR: OptionEntry = OptionEntry {
    label: "Sonar",
    description: "Fast web search model",
    icon: Icon::Brain,
    badge: None,
};

const CLAUDE_SONNET_4: OptionEntry = OptionEntry {
    label: "Claude Sonnet 4.0",
    description: "Advanced reasoning model",
    icon: Icon::Brain,
    badge: None,
};

const CLAUDE_OPUS_4: OptionEntry = OptionEntry {
    label: "Claude Opus 4.1 Thinking",
    description: "Most capable reasoning",
    icon: Icon::Brain,
    badge: Some("max"),
};

const GPT_5: OptionEntry = OptionEntry {
    label: "GPT-5",
    description: "OpenAI's latest model",
    icon: Icon::Brain,
    badge: None,
};

const O3_PRO: OptionEntry = OptionEntry {
    label: "o3-pro",
    description: "Advanced OpenAI model",
    icon: Icon::Brain,
    badge: Some("max"),
};

impl Model {
    pub const ALL: [Model; 6] = [
        Model::Best,
        Model::Sonar,
        Model::ClaudeSonnet4,
        Model::ClaudeOpus4,
        Model::Gpt5,
        Model::O3Pro,
    ];
}

impl OptionKey for Model {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn entry(self) -> &'static OptionEntry {
        match self {
            Model::Best => &BEST,
            Model::Sonar => &SONAR,
            Model::ClaudeSonnet4 => &CLAUDE_SONNET_4,
            Model::ClaudeOpus4 => &CLAUDE_OPUS_4,
            Model::Gpt5 => &GPT_5,
            Model::O3Pro => &O3_PRO,
        }
    }
}
