//! Engine runtime: the single control loop.
//!
//! Everything that mutates the registry, the session, or feedback happens
//! here, in response to discrete events (capture callbacks, host control
//! messages, the restart timer). One utterance runs transcript -> discovery
//! -> resolution -> dispatch -> feedback synchronously; the single-session
//! invariant means no second result can interleave.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dispatch::{DispatchOutcome, Dispatcher, EngineRequest};
use crate::feedback::{confidence_percent, FeedbackSurface};
use crate::metrics::EngineMetrics;
use crate::session::RecognitionSession;
use voxcart_commands::{
    base_commands, discover_page_commands, merge_for_cycle, resolve, CommandSet, SelectorCatalog,
};
use voxcart_dom::DomPage;
use voxcart_foundation::{
    EngineOptions, FeedbackLevel, ERROR_EXPIRY, RESTART_DELAY, STATUS_EXPIRY, UNSUPPORTED_EXPIRY,
};
use voxcart_speech::{CaptureErrorCode, CaptureEvent, SpeechCapture, SpeechPlayback};

/// Control messages from the host page (trigger button, settings panel).
#[derive(Debug, Clone)]
pub enum ControlMsg {
    /// Mic trigger activated: starts listening, or stops it when active.
    TriggerPressed,
    /// Distinct trigger (double activation): flips continuous mode.
    ToggleContinuous,
    SetLanguage(String),
    SetFeedbackLevel(FeedbackLevel),
    SetContinuous(bool),
    SetAutoDiscover(bool),
    /// Internal: delayed continuous-mode restart fired.
    AutoRestart,
    Shutdown,
}

/// Host-side handle to a running engine.
#[derive(Clone)]
pub struct EngineHandle {
    pub control: mpsc::Sender<ControlMsg>,
    pub metrics: EngineMetrics,
}

pub struct VoiceEngine {
    session: RecognitionSession,
    dispatcher: Dispatcher,
    capture: Arc<dyn SpeechCapture>,
    surface: Arc<dyn FeedbackSurface>,
    page: Arc<dyn DomPage>,
    static_set: CommandSet,
    discovered: CommandSet,
    auto_discover: bool,
    trigger_enabled: bool,
    metrics: EngineMetrics,
    capture_rx: mpsc::Receiver<CaptureEvent>,
    control_rx: mpsc::Receiver<ControlMsg>,
    control_tx: mpsc::Sender<ControlMsg>,
}

impl VoiceEngine {
    pub fn new(
        options: EngineOptions,
        page: Arc<dyn DomPage>,
        capture: Arc<dyn SpeechCapture>,
        capture_rx: mpsc::Receiver<CaptureEvent>,
        playback: Arc<dyn SpeechPlayback>,
        surface: Arc<dyn FeedbackSurface>,
    ) -> (Self, EngineHandle) {
        let (control_tx, control_rx) = mpsc::channel(32);
        let metrics = EngineMetrics::new();

        capture.set_language(&options.language);
        let dispatcher = Dispatcher::new(
            Arc::clone(&page),
            SelectorCatalog::storefront(),
            playback,
            Arc::clone(&surface),
            options.feedback_level,
        );

        let engine = Self {
            session: RecognitionSession::new(options.language, options.continuous_mode),
            dispatcher,
            capture,
            surface,
            page,
            static_set: base_commands(),
            discovered: CommandSet::new(),
            auto_discover: options.auto_discover,
            trigger_enabled: true,
            metrics: metrics.clone(),
            capture_rx,
            control_rx,
            control_tx: control_tx.clone(),
        };
        let handle = EngineHandle {
            control: control_tx,
            metrics,
        };
        (engine, handle)
    }

    pub async fn run(mut self) {
        if !self.capture.is_available() {
            // One-time notice; the trigger stays disabled for the page's
            // lifetime, no retries.
            self.trigger_enabled = false;
            warn!("speech capture unavailable, trigger disabled");
            self.surface.show_status(
                "Speech recognition not supported in this browser",
                Some(UNSUPPORTED_EXPIRY),
            );
        }

        loop {
            tokio::select! {
                event = self.capture_rx.recv() => match event {
                    Some(event) => self.on_capture_event(event).await,
                    None => break,
                },
                msg = self.control_rx.recv() => match msg {
                    Some(msg) => {
                        if !self.on_control(msg).await {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
        info!("engine loop stopped");
    }

    async fn on_capture_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Started => match self.session.note_started() {
                Ok(()) => {
                    // Persistent until the next state change.
                    self.surface.show_status("Listening...", None);
                }
                Err(e) => warn!("unexpected capture start: {e}"),
            },
            CaptureEvent::Result {
                transcript,
                confidence,
            } => self.process_utterance(&transcript, confidence).await,
            CaptureEvent::Ended => {
                if let Err(e) = self.session.note_ended() {
                    warn!("unexpected capture end: {e}");
                    return;
                }
                self.surface
                    .show_status("Voice control paused", Some(STATUS_EXPIRY));
                if self.session.continuous() {
                    self.schedule_restart();
                }
            }
            CaptureEvent::Error(code) => self.on_capture_error(code),
        }
    }

    async fn process_utterance(&mut self, transcript: &str, confidence: f32) {
        self.metrics
            .utterances
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.session.note_result(transcript, confidence);

        let percent = confidence_percent(confidence);
        info!("command recognized: {transcript:?} ({percent}% confidence)");
        self.surface
            .show_status(&format!("Command: \"{transcript}\""), Some(STATUS_EXPIRY));
        self.surface.show_confidence(percent);

        // The discovered set is rebuilt every cycle, never cached across
        // utterances.
        if self.auto_discover {
            self.discovered = discover_page_commands(&*self.page);
            self.metrics.discovered_commands.store(
                self.discovered.len(),
                std::sync::atomic::Ordering::Relaxed,
            );
        }

        let dispatched = {
            let merged = merge_for_cycle(&self.static_set, &self.discovered);
            let resolution = resolve(transcript, &merged);
            self.dispatcher.dispatch(&resolution)
        };

        use std::sync::atomic::Ordering::Relaxed;
        match dispatched.outcome {
            DispatchOutcome::Completed => {
                self.metrics.matched.fetch_add(1, Relaxed);
            }
            DispatchOutcome::TargetMissing => {
                self.metrics.matched.fetch_add(1, Relaxed);
                self.metrics.target_missing.fetch_add(1, Relaxed);
            }
            DispatchOutcome::NoMatch => {
                self.metrics.no_match.fetch_add(1, Relaxed);
            }
        }

        if let Some(EngineRequest::StopListening) = dispatched.request {
            debug!("stop requested by command");
            self.session.set_continuous(false);
            self.stop_capture().await;
        }
    }

    fn on_capture_error(&mut self, code: CaptureErrorCode) {
        self.metrics
            .capture_errors
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        warn!("speech recognition error: {code}");
        if let Err(e) = self.session.note_error() {
            warn!("unexpected capture error signal: {e}");
            return;
        }
        // Restart logic is driven by the Ended signal the capability raises
        // after the error, not here.
        self.surface
            .show_status(&format!("Error: {code}"), Some(ERROR_EXPIRY));
    }

    async fn on_control(&mut self, msg: ControlMsg) -> bool {
        match msg {
            ControlMsg::TriggerPressed => {
                if !self.trigger_enabled {
                    debug!("trigger pressed while disabled, ignored");
                } else if self.session.is_listening() {
                    // Manual stop also cancels any pending restart intent.
                    self.session.set_continuous(false);
                    self.stop_capture().await;
                } else {
                    self.request_start().await;
                }
            }
            ControlMsg::ToggleContinuous => {
                let continuous = !self.session.continuous();
                info!("continuous mode {}", if continuous { "on" } else { "off" });
                self.session.set_continuous(continuous);
                if continuous && !self.session.is_listening() {
                    self.request_start().await;
                } else if !continuous && self.session.is_listening() {
                    self.stop_capture().await;
                }
            }
            ControlMsg::AutoRestart => {
                // Continuous mode may have been cancelled while the delay
                // ran; fire only if it is still wanted.
                if self.session.continuous() && !self.session.is_listening() {
                    self.metrics
                        .restarts
                        .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                    self.request_start().await;
                }
            }
            ControlMsg::SetLanguage(tag) => {
                self.session.set_language(tag.clone());
                self.capture.set_language(&tag);
            }
            ControlMsg::SetFeedbackLevel(level) => self.dispatcher.set_feedback_level(level),
            ControlMsg::SetContinuous(continuous) => self.session.set_continuous(continuous),
            ControlMsg::SetAutoDiscover(auto) => self.auto_discover = auto,
            ControlMsg::Shutdown => {
                self.stop_capture().await;
                return false;
            }
        }
        true
    }

    /// Requests capture to begin. A request while already Listening is a
    /// caller error and is ignored rather than starting a second capture.
    async fn request_start(&mut self) {
        if !self.trigger_enabled {
            return;
        }
        if !self.session.can_start() {
            warn!(
                "start requested while {:?}, ignored",
                self.session.state()
            );
            return;
        }
        if let Err(e) = self.capture.start().await {
            warn!("capture start failed: {e}");
            if !e.is_recoverable() {
                self.trigger_enabled = false;
            }
            self.surface
                .show_status(&format!("Error: {e}"), Some(ERROR_EXPIRY));
        }
    }

    async fn stop_capture(&self) {
        if let Err(e) = self.capture.stop().await {
            warn!("capture stop failed: {e}");
        }
    }

    fn schedule_restart(&self) {
        let control = self.control_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(RESTART_DELAY).await;
            let _ = control.send(ControlMsg::AutoRestart).await;
        });
    }
}
