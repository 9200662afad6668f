//! Engine counters, shared with the host for dashboards and tests.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct EngineMetrics {
    /// Utterances received from the capture capability.
    pub utterances: Arc<AtomicU64>,
    /// Utterances that resolved to a command.
    pub matched: Arc<AtomicU64>,
    /// Utterances resolved but whose DOM target was missing.
    pub target_missing: Arc<AtomicU64>,
    /// Utterances with no matching registry entry.
    pub no_match: Arc<AtomicU64>,
    /// Size of the discovered set in the latest resolution cycle.
    pub discovered_commands: Arc<AtomicUsize>,
    /// Continuous-mode restarts actually issued.
    pub restarts: Arc<AtomicU64>,
    /// Capability-reported runtime errors.
    pub capture_errors: Arc<AtomicU64>,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            utterances: self.utterances.load(Ordering::Relaxed),
            matched: self.matched.load(Ordering::Relaxed),
            target_missing: self.target_missing.load(Ordering::Relaxed),
            no_match: self.no_match.load(Ordering::Relaxed),
            discovered_commands: self.discovered_commands.load(Ordering::Relaxed),
            restarts: self.restarts.load(Ordering::Relaxed),
            capture_errors: self.capture_errors.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub utterances: u64,
    pub matched: u64,
    pub target_missing: u64,
    pub no_match: u64,
    pub discovered_commands: usize,
    pub restarts: u64,
    pub capture_errors: u64,
}
