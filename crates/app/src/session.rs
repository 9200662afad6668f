//! Recognition session bookkeeping.
//!
//! One session exists per engine and lives for the page's lifetime. The
//! runtime drives it from capture events; the state machine itself rejects
//! impossible transitions so capability timing bugs surface as logged
//! errors instead of corrupt state.

use voxcart_foundation::{EngineError, SessionState, StateManager};

pub struct RecognitionSession {
    state: StateManager,
    continuous: bool,
    language: String,
    last_transcript: Option<String>,
    last_confidence: Option<f32>,
}

impl RecognitionSession {
    pub fn new(language: impl Into<String>, continuous: bool) -> Self {
        Self {
            state: StateManager::new(),
            continuous,
            language: language.into(),
            last_transcript: None,
            last_confidence: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.current()
    }

    pub fn is_listening(&self) -> bool {
        self.state.current() == SessionState::Listening
    }

    /// Whether `start()` is currently a valid request.
    pub fn can_start(&self) -> bool {
        matches!(
            self.state.current(),
            SessionState::Idle | SessionState::Paused | SessionState::Errored
        )
    }

    pub fn continuous(&self) -> bool {
        self.continuous
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn last_transcript(&self) -> Option<&str> {
        self.last_transcript.as_deref()
    }

    pub fn last_confidence(&self) -> Option<f32> {
        self.last_confidence
    }

    /// Capability accepted the start request.
    pub fn note_started(&mut self) -> Result<(), EngineError> {
        self.state.transition(SessionState::Listening)
    }

    /// A result arrived; records it without changing state. The state change
    /// comes from the end/error signal the capability emits afterwards.
    pub fn note_result(&mut self, transcript: &str, confidence: f32) {
        self.last_transcript = Some(transcript.to_string());
        self.last_confidence = Some(confidence);
    }

    /// Capability ended normally (also raised after an error).
    pub fn note_ended(&mut self) -> Result<(), EngineError> {
        self.state.transition(SessionState::Paused)
    }

    /// Capability reported a runtime error.
    pub fn note_error(&mut self) -> Result<(), EngineError> {
        self.state.transition(SessionState::Errored)
    }
}
