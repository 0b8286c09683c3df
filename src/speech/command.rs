//! External-command recognizer.
//!
//! Runs a user-configured program (for example a local Whisper wrapper) that
//! records one utterance and prints the transcript on stdout. `{lang}` in the
//! command line is replaced with the session locale, which is also exported
//! as `DEEPSITE_SPEECH_LANG`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::mpsc::Sender;

use super::recognizer::{
    RecognitionSettings, SpeechCapability, SpeechError, SpeechEvent, SpeechRecognizer,
};

pub const LANG_ENV_VAR: &str = "DEEPSITE_SPEECH_LANG";

pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    /// Parse a whitespace-separated command line. Returns `None` when blank.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn capture(
        &self,
        settings: &RecognitionSettings,
        sender: &Sender<SpeechEvent>,
    ) -> Result<String, SpeechError> {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace("{lang}", &settings.lang))
            .collect();

        debug!("Spawning speech command: {} {:?}", self.program, args);
        let child = tokio::process::Command::new(&self.program)
            .args(&args)
            .env(LANG_ENV_VAR, &settings.lang)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Spawn(e.to_string()))?;

        sender
            .send(SpeechEvent::Started)
            .await
            .map_err(|_| SpeechError::ChannelClosed)?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| SpeechError::Spawn(e.to_string()))?;

        if !output.status.success() {
            return Err(SpeechError::Exit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            return Err(SpeechError::Empty);
        }
        Ok(transcript)
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    fn name(&self) -> &str {
        "command"
    }

    async fn recognize(
        &self,
        settings: RecognitionSettings,
        sender: Sender<SpeechEvent>,
    ) -> Result<(), SpeechError> {
        let outcome = self.capture(&settings, &sender).await;

        let event = match &outcome {
            Ok(transcript) => {
                info!("Speech recognized ({} chars)", transcript.chars().count());
                SpeechEvent::Result(transcript.clone())
            }
            Err(e) => {
                warn!("Speech capture failed: {}", e);
                SpeechEvent::Error(e.to_string())
            }
        };

        // Ended must follow both outcomes; a closed channel only matters if
        // nothing else already failed.
        let delivered = sender.send(event).await.is_ok() && sender.send(SpeechEvent::Ended).await.is_ok();

        match outcome {
            Ok(_) if !delivered => Err(SpeechError::ChannelClosed),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Speech is available when a command is configured and its program exists.
pub struct CommandCapability {
    command: Option<String>,
}

impl CommandCapability {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }
}

impl SpeechCapability for CommandCapability {
    fn recognizer(&self) -> Option<Arc<dyn SpeechRecognizer>> {
        let recognizer = CommandRecognizer::parse(self.command.as_deref()?)?;
        if resolve_program(recognizer.program()).is_none() {
            debug!("Speech command not found: {}", recognizer.program());
            return None;
        }
        Some(Arc::new(recognizer))
    }
}

/// Locate `program` the way a shell would: paths are taken as-is, bare names
/// are searched on `PATH`.
fn resolve_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|full| full.is_file())
}
