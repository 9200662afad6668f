//! Speech capture and playback capability traits.
//!
//! Real capture/playback (Web Speech, native engines) lives outside this
//! workspace; the engine only depends on the traits here. `ScriptedCapture`
//! and the playback stubs are the in-tree implementations used by the demo
//! binary and by tests.

pub mod capture;
pub mod playback;
pub mod scripted;

pub use capture::{CaptureErrorCode, CaptureEvent, SpeechCapture};
pub use playback::{LogPlayback, NullPlayback, SpeechPlayback};
pub use scripted::ScriptedCapture;
