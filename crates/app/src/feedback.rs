//! Feedback surface seam and feedback events.
//!
//! Rendering (toast widgets, status pill, confidence badge) is owned by the
//! host UI; the engine only calls the trait. `RecordingSurface` captures the
//! calls for tests, `LogSurface` narrates them through `tracing` for the
//! demo binary.

use parking_lot::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
}

/// One ephemeral feedback emission. Not persisted; the surface owns expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEvent {
    pub message: String,
    pub kind: FeedbackKind,
    pub spoken: bool,
}

/// Visual feedback surface. `duration: None` means the status stays until
/// replaced. New feedback for the same slot simply overwrites the previous
/// one; timers are not cancelled (last write wins).
pub trait FeedbackSurface: Send + Sync {
    fn show_status(&self, message: &str, duration: Option<Duration>);
    fn show_toast(&self, message: &str, kind: FeedbackKind);
    fn show_confidence(&self, percent: u8);
    fn toggle_help_panel(&self) {}
    fn toggle_settings_panel(&self) {}
}

/// Capability confidence as the displayed percent value.
pub fn confidence_percent(confidence: f32) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Surface call log entry, for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Status(String, Option<Duration>),
    Toast(String, FeedbackKind),
    Confidence(u8),
    HelpPanel,
    SettingsPanel,
}

#[derive(Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().clone()
    }

    pub fn toasts(&self) -> Vec<(String, FeedbackKind)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Toast(msg, kind) => Some((msg.clone(), *kind)),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Status(msg, _) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl FeedbackSurface for RecordingSurface {
    fn show_status(&self, message: &str, duration: Option<Duration>) {
        self.calls
            .lock()
            .push(SurfaceCall::Status(message.to_string(), duration));
    }

    fn show_toast(&self, message: &str, kind: FeedbackKind) {
        self.calls
            .lock()
            .push(SurfaceCall::Toast(message.to_string(), kind));
    }

    fn show_confidence(&self, percent: u8) {
        self.calls.lock().push(SurfaceCall::Confidence(percent));
    }

    fn toggle_help_panel(&self) {
        self.calls.lock().push(SurfaceCall::HelpPanel);
    }

    fn toggle_settings_panel(&self) {
        self.calls.lock().push(SurfaceCall::SettingsPanel);
    }
}

/// Narrates surface calls through `tracing`.
pub struct LogSurface;

impl FeedbackSurface for LogSurface {
    fn show_status(&self, message: &str, duration: Option<Duration>) {
        match duration {
            Some(d) => tracing::info!(target: "ui", "status [{}ms] {message}", d.as_millis()),
            None => tracing::info!(target: "ui", "status [sticky] {message}"),
        }
    }

    fn show_toast(&self, message: &str, kind: FeedbackKind) {
        tracing::info!(target: "ui", "toast {kind:?}: {message}");
    }

    fn show_confidence(&self, percent: u8) {
        tracing::info!(target: "ui", "confidence {percent}%");
    }

    fn toggle_help_panel(&self) {
        tracing::info!(target: "ui", "help panel toggled");
    }

    fn toggle_settings_panel(&self) {
        tracing::info!(target: "ui", "settings panel toggled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_rounded_percent() {
        assert_eq!(confidence_percent(0.87), 87);
        assert_eq!(confidence_percent(0.875), 88);
        assert_eq!(confidence_percent(0.0), 0);
        assert_eq!(confidence_percent(1.0), 100);
    }

    #[test]
    fn out_of_range_confidence_is_clamped() {
        assert_eq!(confidence_percent(1.7), 100);
        assert_eq!(confidence_percent(-0.3), 0);
    }

    #[test]
    fn recording_surface_keeps_order() {
        let surface = RecordingSurface::new();
        surface.show_status("Listening...", None);
        surface.show_toast("Added to Cart", FeedbackKind::Success);
        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::Status("Listening...".to_string(), None),
                SurfaceCall::Toast("Added to Cart".to_string(), FeedbackKind::Success),
            ]
        );
    }
}
