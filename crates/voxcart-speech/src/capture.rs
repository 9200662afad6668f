//! Speech capture capability.

use async_trait::async_trait;
use thiserror::Error;
use voxcart_foundation::EngineError;

/// Error codes reported by the capture capability at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureErrorCode {
    #[error("not-allowed")]
    NotAllowed,
    #[error("no-speech")]
    NoSpeech,
    #[error("network")]
    Network,
    #[error("aborted")]
    Aborted,
    #[error("audio-capture")]
    AudioCapture,
    #[error("{0}")]
    Other(String),
}

/// Events a capture implementation delivers on its event channel.
///
/// For one utterance the capability emits `Started`, zero or one `Result`,
/// then `Ended`; a runtime failure inserts `Error` before `Ended` (browsers
/// raise `end` after `error`).
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    Started,
    Result { transcript: String, confidence: f32 },
    Ended,
    Error(CaptureErrorCode),
}

/// Speech-to-text capture capability.
///
/// Implementations are handed an `mpsc::Sender<CaptureEvent>` at
/// construction and deliver all lifecycle events through it; `start` and
/// `stop` only request the transition.
#[async_trait]
pub trait SpeechCapture: Send + Sync {
    /// Whether capture is supported in this environment at all.
    fn is_available(&self) -> bool;

    /// Requests capture to begin. Rejected while already capturing.
    async fn start(&self) -> Result<(), EngineError>;

    /// Requests capture to stop; the capability still emits `Ended`.
    async fn stop(&self) -> Result<(), EngineError>;

    /// Updates the recognition language for subsequent captures.
    fn set_language(&self, tag: &str);
}
