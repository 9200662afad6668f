//! Speech playback capability.

/// Text-to-speech playback, fire-and-forget. No cancellation is exposed.
pub trait SpeechPlayback: Send + Sync {
    fn speak(&self, text: &str);
}

/// Discards all speech. Useful when feedback is fully muted.
pub struct NullPlayback;

impl SpeechPlayback for NullPlayback {
    fn speak(&self, _text: &str) {}
}

/// Logs speech through `tracing` instead of synthesizing audio.
pub struct LogPlayback;

impl SpeechPlayback for LogPlayback {
    fn speak(&self, text: &str) {
        tracing::info!(target: "tts", "speak: {text}");
    }
}
