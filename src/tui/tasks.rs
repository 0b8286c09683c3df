//! Background tasks spawned by the event loop.
//!
//! Tasks never touch state. They post `Action`s back over the std channel the
//! loop drains between frames.

use std::sync::{Arc, mpsc};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::core::action::Action;
use crate::speech::{RecognitionSettings, SpeechEvent, SpeechRecognizer};

/// Simulated latency of a send.
pub const SEND_DELAY: Duration = Duration::from_millis(1000);

/// Buffer between a recognizer and the forwarder.
const SPEECH_CHANNEL_CAPACITY: usize = 8;

/// Wait `SEND_DELAY`, then report the outcome for `text`.
///
/// The delay runs in its own task so a panic or abort there surfaces as
/// `SendFailed` instead of being lost.
pub fn spawn_send(text: String, tx: mpsc::Sender<Action>) -> JoinHandle<()> {
    info!("Spawning send ({} chars)", text.chars().count());
    tokio::spawn(async move {
        let delay = tokio::spawn(tokio::time::sleep(SEND_DELAY));
        let action = match delay.await {
            Ok(()) => {
                info!("Send completed");
                Action::SendSucceeded(text)
            }
            Err(e) => {
                warn!("Send task failed: {}", e);
                Action::SendFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver send outcome: receiver dropped");
        }
    })
}

/// Run one recognition session and forward its events as `Action::Voice`.
///
/// Whatever the recognizer does, the loop sees an outcome (`Result` or
/// `Error`) followed by `Ended`, so the listening flag always clears.
pub fn spawn_voice(
    recognizer: Arc<dyn SpeechRecognizer>,
    settings: RecognitionSettings,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning voice recognition via '{}'", recognizer.name());
    let (event_tx, mut event_rx) = tokio::sync::mpsc::channel::<SpeechEvent>(SPEECH_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let session = tokio::spawn(async move { recognizer.recognize(settings, event_tx).await });

        let mut saw_outcome = false;
        let mut ended = false;
        while let Some(event) = event_rx.recv().await {
            debug!("Forwarding speech event: {:?}", event);
            match event {
                SpeechEvent::Result(_) | SpeechEvent::Error(_) => saw_outcome = true,
                SpeechEvent::Ended => ended = true,
                SpeechEvent::Started => {}
            }
            if tx.send(Action::Voice(event)).is_err() {
                warn!("Failed to forward speech event: receiver dropped");
                return;
            }
        }

        let failure = match session.await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(e) => Some(e.to_string()),
        };
        if let Some(message) = &failure {
            warn!("Voice recognition failed: {}", message);
        }

        let mut trailing = Vec::new();
        if !saw_outcome && let Some(message) = failure {
            trailing.push(SpeechEvent::Error(message));
        }
        if !ended {
            trailing.push(SpeechEvent::Ended);
        }
        for event in trailing {
            if tx.send(Action::Voice(event)).is_err() {
                warn!("Failed to forward speech event: receiver dropped");
                return;
            }
        }
        info!("Voice recognition finished");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::SpeechError;
    use crate::test_support::StubRecognizer;

    fn drain(rx: &mpsc::Receiver<Action>) -> Vec<Action> {
        rx.try_iter().collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_reports_success_after_delay() {
        let (tx, rx) = mpsc::channel();
        let start = tokio::time::Instant::now();

        spawn_send("Hello world".to_string(), tx).await.unwrap();

        assert!(start.elapsed() >= SEND_DELAY);
        assert_eq!(drain(&rx), [Action::SendSucceeded("Hello world".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_silent_before_delay() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_send("hi".to_string(), tx);

        tokio::time::sleep(SEND_DELAY - Duration::from_millis(1)).await;
        assert!(drain(&rx).is_empty());

        handle.await.unwrap();
        assert_eq!(drain(&rx).len(), 1);
    }

    #[tokio::test]
    async fn test_voice_forwards_events_in_order() {
        let (tx, rx) = mpsc::channel();
        let stub = StubRecognizer::new(vec![
            SpeechEvent::Started,
            SpeechEvent::Result("hello there".to_string()),
            SpeechEvent::Ended,
        ]);

        spawn_voice(Arc::new(stub), RecognitionSettings::default(), tx)
            .await
            .unwrap();

        assert_eq!(
            drain(&rx),
            [
                Action::Voice(SpeechEvent::Started),
                Action::Voice(SpeechEvent::Result("hello there".to_string())),
                Action::Voice(SpeechEvent::Ended),
            ]
        );
    }

    #[tokio::test]
    async fn test_voice_synthesizes_ended() {
        let (tx, rx) = mpsc::channel();
        let stub = StubRecognizer::new(vec![
            SpeechEvent::Started,
            SpeechEvent::Result("no end".to_string()),
        ]);

        spawn_voice(Arc::new(stub), RecognitionSettings::default(), tx)
            .await
            .unwrap();

        let actions = drain(&rx);
        assert_eq!(actions.last(), Some(&Action::Voice(SpeechEvent::Ended)));
        assert_eq!(actions.len(), 3);
    }

    #[tokio::test]
    async fn test_voice_failure_without_events_reports_error() {
        let (tx, rx) = mpsc::channel();
        let stub = StubRecognizer::failing(SpeechError::Empty);

        spawn_voice(Arc::new(stub), RecognitionSettings::default(), tx)
            .await
            .unwrap();

        let actions = drain(&rx);
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], Action::Voice(SpeechEvent::Error(_))));
        assert_eq!(actions[1], Action::Voice(SpeechEvent::Ended));
    }

    #[tokio::test]
    async fn test_voice_passes_settings_through() {
        let (tx, _rx) = mpsc::channel();
        let stub = Arc::new(StubRecognizer::new(vec![SpeechEvent::Ended]));

        spawn_voice(stub.clone(), RecognitionSettings::default(), tx)
            .await
            .unwrap();

        let seen = stub.last_settings().unwrap();
        assert!(!seen.continuous);
        assert!(!seen.interim_results);
        assert_eq!(seen.lang, "en-US");
    }
}
