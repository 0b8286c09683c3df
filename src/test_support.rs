//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::core::config::{ChatConfig, CliOverrides, ResolvedConfig, resolve};
use crate::speech::{
    RecognitionSettings, SpeechCapability, SpeechError, SpeechEvent, SpeechRecognizer,
};

/// A recognizer that replays a fixed script of events.
pub struct StubRecognizer {
    events: Vec<SpeechEvent>,
    failure: Mutex<Option<SpeechError>>,
    settings: Mutex<Option<RecognitionSettings>>,
}

impl StubRecognizer {
    pub fn new(events: Vec<SpeechEvent>) -> Self {
        Self {
            events,
            failure: Mutex::new(None),
            settings: Mutex::new(None),
        }
    }

    /// Emits nothing and returns `error`.
    pub fn failing(error: SpeechError) -> Self {
        Self {
            events: Vec::new(),
            failure: Mutex::new(Some(error)),
            settings: Mutex::new(None),
        }
    }

    /// Settings passed to the most recent `recognize` call.
    pub fn last_settings(&self) -> Option<RecognitionSettings> {
        self.settings.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechRecognizer for StubRecognizer {
    fn name(&self) -> &str {
        "stub"
    }

    async fn recognize(
        &self,
        settings: RecognitionSettings,
        sender: Sender<SpeechEvent>,
    ) -> Result<(), SpeechError> {
        *self.settings.lock().unwrap() = Some(settings);
        for event in &self.events {
            if sender.send(event.clone()).await.is_err() {
                return Err(SpeechError::ChannelClosed);
            }
        }
        match self.failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Capability with a fixed answer.
pub struct StubCapability {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
}

impl StubCapability {
    pub fn unsupported() -> Self {
        Self { recognizer: None }
    }

    pub fn with(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self {
            recognizer: Some(recognizer),
        }
    }
}

impl SpeechCapability for StubCapability {
    fn recognizer(&self) -> Option<Arc<dyn SpeechRecognizer>> {
        self.recognizer.clone()
    }
}

/// Defaults with no config file and no CLI flags.
pub fn default_config() -> ResolvedConfig {
    resolve(&ChatConfig::default(), &CliOverrides::default())
}
