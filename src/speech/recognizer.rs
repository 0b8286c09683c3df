use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

/// Locale every recognition session is started with.
pub const DEFAULT_LANG: &str = "en-US";

/// Errors a recognizer can report. All of them end the session.
#[derive(Debug)]
pub enum SpeechError {
    /// The capture process could not be started.
    Spawn(String),
    /// The capture process exited unsuccessfully.
    Exit { code: Option<i32>, stderr: String },
    /// Capture finished but nothing was recognized.
    Empty,
    /// The event channel was closed (the UI dropped the receiver).
    ChannelClosed,
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Spawn(msg) => write!(f, "failed to start capture: {msg}"),
            SpeechError::Exit { code: Some(code), stderr } => {
                write!(f, "capture exited with status {code}: {stderr}")
            }
            SpeechError::Exit { code: None, stderr } => {
                write!(f, "capture terminated by signal: {stderr}")
            }
            SpeechError::Empty => write!(f, "no speech recognized"),
            SpeechError::ChannelClosed => write!(f, "channel closed"),
        }
    }
}

impl std::error::Error for SpeechError {}

/// Lifecycle events of a single recognition session, in order:
/// `Started`, then `Result` or `Error`, then `Ended`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    Result(String),
    Error(String),
    Ended,
}

/// How a session captures speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSettings {
    /// Keep listening after the first utterance.
    pub continuous: bool,
    /// Report partial transcripts while the user is still speaking.
    pub interim_results: bool,
    pub lang: String,
}

impl Default for RecognitionSettings {
    /// Single utterance, final results only, fixed locale.
    fn default() -> Self {
        Self {
            continuous: false,
            interim_results: false,
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Returns the name of the recognizer.
    fn name(&self) -> &str;

    /// Runs one capture session, reporting its lifecycle on `sender`.
    ///
    /// Implementations always finish with `SpeechEvent::Ended` unless the
    /// channel is gone.
    async fn recognize(
        &self,
        settings: RecognitionSettings,
        sender: Sender<SpeechEvent>,
    ) -> Result<(), SpeechError>;
}

/// Probes the environment for speech support.
pub trait SpeechCapability: Send + Sync {
    /// A recognizer if speech input is usable right now.
    fn recognizer(&self) -> Option<Arc<dyn SpeechRecognizer>>;
}
