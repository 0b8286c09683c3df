//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.deepsite/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::options::{Mode, Model};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub attach: AttachConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_mode: Option<Mode>,
    pub default_model: Option<Model>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VoiceConfig {
    /// Command that records one utterance and prints its transcript.
    pub command: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AttachConfig {
    pub start_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub toast_duration_ms: Option<u64>,
}

/// Values given on the command line (None = flag not passed).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub mode: Option<Mode>,
    pub model: Option<Model>,
    pub voice_command: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TOAST_DURATION_MS: u64 = 4000;
pub const VOICE_COMMAND_ENV_VAR: &str = "DEEPSITE_VOICE_COMMAND";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub mode: Mode,
    pub model: Model,
    pub voice_command: Option<String>,
    pub attach_start_dir: PathBuf,
    pub toast_duration: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.deepsite/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".deepsite").join("config.toml"))
}

/// Load config from `path`, or from `~/.deepsite/config.toml` when `None`.
///
/// A missing default file is generated (commented out) and treated as empty.
/// A missing explicit file is treated as empty. A malformed file returns
/// `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<ChatConfig, ConfigError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match config_path() {
            Some(p) => (p, false),
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(ChatConfig::default());
            }
        },
    };

    if !path.exists() {
        if explicit {
            warn!("Config file {} does not exist, using defaults", path.display());
        } else {
            info!("No config file found, generating default at {}", path.display());
            generate_default_config(&path);
        }
        return Ok(ChatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ChatConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# DeepSite Chat Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_mode = "search"            # "search", "research", "labs"
# default_model = "best"             # "best", "sonar", "claude-sonnet-4",
#                                    # "claude-opus-4", "gpt-5", "o3-pro"

# [voice]
# command = "whisper-once --language {lang}"   # Or set DEEPSITE_VOICE_COMMAND

# [attach]
# start_dir = "/home/me/Documents"

# [ui]
# toast_duration_ms = 4000
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatConfig, cli: &CliOverrides) -> ResolvedConfig {
    let mode = cli
        .mode
        .or(config.general.default_mode)
        .unwrap_or_default();

    let model = cli
        .model
        .or(config.general.default_model)
        .unwrap_or_default();

    // Voice command: CLI → env → config
    let voice_command = cli
        .voice_command
        .clone()
        .or_else(|| std::env::var(VOICE_COMMAND_ENV_VAR).ok())
        .or_else(|| config.voice.command.clone())
        .filter(|c| !c.trim().is_empty());

    let attach_start_dir = config
        .attach
        .start_dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    ResolvedConfig {
        mode,
        model,
        voice_command,
        attach_start_dir,
        toast_duration: Duration::from_millis(
            config.ui.toast_duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ChatConfig::default();
        assert!(config.general.default_mode.is_none());
        assert!(config.voice.command.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&ChatConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.mode, Mode::Search);
        assert_eq!(resolved.model, Model::Best);
        assert_eq!(
            resolved.toast_duration,
            Duration::from_millis(DEFAULT_TOAST_DURATION_MS)
        );
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ChatConfig {
            general: GeneralConfig {
                default_mode: Some(Mode::Research),
                default_model: Some(Model::ClaudeOpus4),
            },
            attach: AttachConfig {
                start_dir: Some(PathBuf::from("/tmp")),
            },
            ui: UiConfig {
                toast_duration_ms: Some(1500),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.mode, Mode::Research);
        assert_eq!(resolved.model, Model::ClaudeOpus4);
        assert_eq!(resolved.attach_start_dir, PathBuf::from("/tmp"));
        assert_eq!(resolved.toast_duration, Duration::from_millis(1500));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = ChatConfig {
            general: GeneralConfig {
                default_mode: Some(Mode::Research),
                default_model: Some(Model::Sonar),
            },
            voice: VoiceConfig {
                command: Some("from-config".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            mode: Some(Mode::Labs),
            model: Some(Model::O3Pro),
            voice_command: Some("from-cli".to_string()),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.mode, Mode::Labs);
        assert_eq!(resolved.model, Model::O3Pro);
        assert_eq!(resolved.voice_command.as_deref(), Some("from-cli"));
    }

    #[test]
    fn test_blank_voice_command_is_dropped() {
        let cli = CliOverrides {
            voice_command: Some("   ".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&ChatConfig::default(), &cli);
        assert!(resolved.voice_command.is_none());
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r#"
[general]
default_mode = "labs"
default_model = "claude-sonnet-4"

[voice]
command = "whisper-once --language {lang}"

[attach]
start_dir = "/home/me/docs"

[ui]
toast_duration_ms = 2500
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.general.default_mode, Some(Mode::Labs));
        assert_eq!(config.general.default_model, Some(Model::ClaudeSonnet4));
        assert_eq!(
            config.voice.command.as_deref(),
            Some("whisper-once --language {lang}")
        );
        assert_eq!(config.attach.start_dir, Some(PathBuf::from("/home/me/docs")));
        assert_eq!(config.ui.toast_duration_ms, Some(2500));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config = parse_config("[general]\ndefault_model = \"gpt-5\"\n").unwrap();
        assert_eq!(config.general.default_model, Some(Model::Gpt5));
        assert!(config.general.default_mode.is_none());
        assert!(config.voice.command.is_none());
    }

    #[test]
    fn test_unknown_model_is_parse_error() {
        let err = parse_config("[general]\ndefault_model = \"gpt-2\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_missing_explicit_path_yields_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/deepsite/config.toml"))).unwrap();
        assert!(config.general.default_mode.is_none());
    }
}
