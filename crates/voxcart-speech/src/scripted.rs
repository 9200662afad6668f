//! Scripted capture implementation.
//!
//! Stands in for a real recognizer: the owner feeds transcripts with
//! [`ScriptedCapture::utter`] and the capability emits the same event
//! sequence a one-shot browser recognizer would (`Started`, `Result`,
//! `Ended`).

use crate::capture::{CaptureErrorCode, CaptureEvent, SpeechCapture};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::mpsc;
use voxcart_foundation::EngineError;

pub struct ScriptedCapture {
    events: mpsc::Sender<CaptureEvent>,
    active: Mutex<bool>,
    language: Mutex<String>,
    available: bool,
    starts: AtomicU32,
    stops: AtomicU32,
}

impl ScriptedCapture {
    pub fn new(events: mpsc::Sender<CaptureEvent>) -> Self {
        Self {
            events,
            active: Mutex::new(false),
            language: Mutex::new("en-US".to_string()),
            available: true,
            starts: AtomicU32::new(0),
            stops: AtomicU32::new(0),
        }
    }

    /// A capture that reports itself unsupported.
    pub fn unavailable(events: mpsc::Sender<CaptureEvent>) -> Self {
        Self {
            available: false,
            ..Self::new(events)
        }
    }

    pub fn is_active(&self) -> bool {
        *self.active.lock()
    }

    pub fn language(&self) -> String {
        self.language.lock().clone()
    }

    /// Number of accepted `start` requests.
    pub fn start_count(&self) -> u32 {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> u32 {
        self.stops.load(Ordering::SeqCst)
    }

    /// Delivers one utterance, then ends the capture like a one-shot
    /// recognizer. Ignored while not capturing.
    pub async fn utter(&self, transcript: &str, confidence: f32) {
        {
            let mut active = self.active.lock();
            if !*active {
                tracing::debug!("utterance dropped, capture not active");
                return;
            }
            *active = false;
        }
        let _ = self
            .events
            .send(CaptureEvent::Result {
                transcript: transcript.to_string(),
                confidence,
            })
            .await;
        let _ = self.events.send(CaptureEvent::Ended).await;
    }

    /// Raises a capability error followed by `Ended`, the order browsers
    /// deliver them in.
    pub async fn raise_error(&self, code: CaptureErrorCode) {
        {
            let mut active = self.active.lock();
            if !*active {
                return;
            }
            *active = false;
        }
        let _ = self.events.send(CaptureEvent::Error(code)).await;
        let _ = self.events.send(CaptureEvent::Ended).await;
    }
}

#[async_trait]
impl SpeechCapture for ScriptedCapture {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn start(&self) -> Result<(), EngineError> {
        if !self.available {
            return Err(EngineError::CapabilityUnavailable);
        }
        {
            let mut active = self.active.lock();
            if *active {
                return Err(EngineError::CaptureAlreadyActive);
            }
            *active = true;
        }
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.events
            .send(CaptureEvent::Started)
            .await
            .map_err(|_| EngineError::ChannelClosed("capture events"))
    }

    async fn stop(&self) -> Result<(), EngineError> {
        let was_active = {
            let mut active = self.active.lock();
            std::mem::replace(&mut *active, false)
        };
        self.stops.fetch_add(1, Ordering::SeqCst);
        if was_active {
            self.events
                .send(CaptureEvent::Ended)
                .await
                .map_err(|_| EngineError::ChannelClosed("capture events"))?;
        }
        Ok(())
    }

    fn set_language(&self, tag: &str) {
        *self.language.lock() = tag.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_shot_event_sequence() {
        let (tx, mut rx) = mpsc::channel(8);
        let capture = ScriptedCapture::new(tx);
        capture.start().await.unwrap();
        capture.utter("go to cart", 0.9).await;

        assert_eq!(rx.recv().await, Some(CaptureEvent::Started));
        assert!(matches!(
            rx.recv().await,
            Some(CaptureEvent::Result { transcript, .. }) if transcript == "go to cart"
        ));
        assert_eq!(rx.recv().await, Some(CaptureEvent::Ended));
        assert!(!capture.is_active());
    }

    #[tokio::test]
    async fn start_while_active_is_rejected() {
        let (tx, _rx) = mpsc::channel(8);
        let capture = ScriptedCapture::new(tx);
        capture.start().await.unwrap();
        assert!(matches!(
            capture.start().await,
            Err(EngineError::CaptureAlreadyActive)
        ));
        assert_eq!(capture.start_count(), 1);
    }

    #[tokio::test]
    async fn error_is_followed_by_ended() {
        let (tx, mut rx) = mpsc::channel(8);
        let capture = ScriptedCapture::new(tx);
        capture.start().await.unwrap();
        capture.raise_error(CaptureErrorCode::NoSpeech).await;

        assert_eq!(rx.recv().await, Some(CaptureEvent::Started));
        assert_eq!(
            rx.recv().await,
            Some(CaptureEvent::Error(CaptureErrorCode::NoSpeech))
        );
        assert_eq!(rx.recv().await, Some(CaptureEvent::Ended));
    }

    #[tokio::test]
    async fn unavailable_capture_rejects_start() {
        let (tx, _rx) = mpsc::channel(8);
        let capture = ScriptedCapture::unavailable(tx);
        assert!(!capture.is_available());
        assert!(matches!(
            capture.start().await,
            Err(EngineError::CapabilityUnavailable)
        ));
    }
}
