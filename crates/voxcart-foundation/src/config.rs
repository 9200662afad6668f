//! Engine options exposed to the host page.
//!
//! Every field can be changed live through the engine's control channel;
//! no restart is required.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How chatty spoken feedback is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackLevel {
    /// Speak every confirmation and error.
    Full,
    /// Speak errors only.
    Minimal,
    /// Never speak.
    #[serde(rename = "none")]
    Silent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// BCP-47 tag passed to the capture capability.
    pub language: String,
    pub feedback_level: FeedbackLevel,
    /// Restart listening automatically after each utterance.
    pub continuous_mode: bool,
    /// Rebuild the discovered command set before each resolution cycle.
    pub auto_discover: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            feedback_level: FeedbackLevel::Full,
            continuous_mode: false,
            auto_discover: true,
        }
    }
}

/// Delay before a continuous-mode restart after the capability ends.
pub const RESTART_DELAY: Duration = Duration::from_millis(500);

/// Expiry for transient status lines ("paused", recognized command).
pub const STATUS_EXPIRY: Duration = Duration::from_millis(2000);

/// Expiry for error status lines and the confidence indicator.
pub const ERROR_EXPIRY: Duration = Duration::from_millis(3000);

/// Expiry for the one-time "capture unsupported" notice.
pub const UNSUPPORTED_EXPIRY: Duration = Duration::from_millis(5000);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_defaults() {
        let opts = EngineOptions::default();
        assert_eq!(opts.language, "en-US");
        assert_eq!(opts.feedback_level, FeedbackLevel::Full);
        assert!(!opts.continuous_mode);
        assert!(opts.auto_discover);
    }

    #[test]
    fn feedback_level_round_trips_through_serde() {
        let json = "\"none\"";
        let level: FeedbackLevel = serde_json::from_str(json).unwrap();
        assert_eq!(level, FeedbackLevel::Silent);
        assert_eq!(serde_json::to_string(&level).unwrap(), json);
    }
}
