use crate::state::SessionState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("speech capture is not supported in this environment")]
    CapabilityUnavailable,

    #[error("invalid session transition: {from:?} -> {to:?}")]
    InvalidTransition { from: SessionState, to: SessionState },

    #[error("capture is already active")]
    CaptureAlreadyActive,

    #[error("capture backend error: {0}")]
    CaptureBackend(String),

    #[error("channel closed: {0}")]
    ChannelClosed(&'static str),

    #[error("fatal error, cannot recover: {0}")]
    Fatal(String),
}

impl EngineError {
    /// Whether the engine may keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            EngineError::Fatal(_) | EngineError::ChannelClosed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_and_closed_channel_are_not_recoverable() {
        assert!(!EngineError::Fatal("backend crashed".into()).is_recoverable());
        assert!(!EngineError::ChannelClosed("capture events").is_recoverable());
        assert!(EngineError::CaptureAlreadyActive.is_recoverable());
        assert!(EngineError::CapabilityUnavailable.is_recoverable());
    }
}
