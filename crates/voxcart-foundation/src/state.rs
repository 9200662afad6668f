use crate::error::EngineError;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;

/// Lifecycle of the one recognition session the engine owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Listening,
    Paused,
    Errored,
}

/// Tracks the session state and enforces the transition table.
///
/// Clonable handle over shared state; every accepted transition is also
/// broadcast to subscribers.
#[derive(Clone)]
pub struct StateManager {
    state: Arc<RwLock<SessionState>>,
    state_tx: Sender<SessionState>,
    state_rx: Receiver<SessionState>,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    pub fn new() -> Self {
        let (state_tx, state_rx) = crossbeam_channel::unbounded();
        Self {
            state: Arc::new(RwLock::new(SessionState::Idle)),
            state_tx,
            state_rx,
        }
    }

    pub fn transition(&self, new_state: SessionState) -> Result<(), EngineError> {
        let mut current = self.state.write();

        let valid = matches!(
            (&*current, &new_state),
            (SessionState::Idle, SessionState::Listening)
                | (SessionState::Paused, SessionState::Listening)
                | (SessionState::Paused, SessionState::Idle)
                | (SessionState::Errored, SessionState::Listening)
                | (SessionState::Errored, SessionState::Paused)
                | (SessionState::Errored, SessionState::Idle)
                | (SessionState::Listening, SessionState::Paused)
                | (SessionState::Listening, SessionState::Errored)
        );

        if !valid {
            return Err(EngineError::InvalidTransition {
                from: *current,
                to: new_state,
            });
        }

        tracing::debug!("Session transition: {:?} -> {:?}", *current, new_state);
        *current = new_state;
        let _ = self.state_tx.send(new_state);
        Ok(())
    }

    pub fn current(&self) -> SessionState {
        *self.state.read()
    }

    pub fn subscribe(&self) -> Receiver<SessionState> {
        self.state_rx.clone()
    }
}
