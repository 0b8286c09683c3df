//! # Speech Recognition
//!
//! Optional voice input for the composer. Whether speech is available is
//! decided at call time by a [`SpeechCapability`], so the composer's
//! "supported or not" branch can be exercised without real audio hardware.
//!
//! ```text
//! SpeechCapability ──recognizer()──► Option<Arc<dyn SpeechRecognizer>>
//!                                             │
//!                                   recognize(settings, tx)
//!                                             │
//!                     Started ─► Result(text) | Error(msg) ─► Ended
//! ```

pub mod command;
pub mod recognizer;

pub use command::{CommandCapability, CommandRecognizer};
pub use recognizer::{
    RecognitionSettings, SpeechCapability, SpeechError, SpeechEvent, SpeechRecognizer,
};
