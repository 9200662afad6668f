//! Action dispatch.
//!
//! Interprets a resolved command against the page, emitting exactly one
//! feedback event (spoken + toast) per invocation. All page side effects are
//! fire-and-forget.

use crate::feedback::{FeedbackEvent, FeedbackKind, FeedbackSurface};
use std::sync::Arc;
use tracing::{debug, info};
use voxcart_commands::{PageAction, Resolution, SelectorCatalog};
use voxcart_dom::{DomPage, NodeId};
use voxcart_foundation::{FeedbackLevel, ERROR_EXPIRY};
use voxcart_speech::SpeechPlayback;

pub const NO_MATCH_APOLOGY: &str = "Sorry, I didn't understand that command";
pub const NO_MATCH_STATUS: &str = "Command not recognized. Try 'help' for a list of commands.";
pub const NO_MATCH_TOAST: &str = "Command not recognized";

/// Things only the runtime may do on the dispatcher's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineRequest {
    StopListening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Action ran against its target.
    Completed,
    /// The command matched but its DOM target could not be located. Still
    /// counts as handled, not as a NoMatch.
    TargetMissing,
    NoMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatched {
    pub outcome: DispatchOutcome,
    pub request: Option<EngineRequest>,
}

enum Performed {
    /// Success, optionally carrying text for feedback templates (captured
    /// parameter or text read from the page).
    Done(Option<String>),
    TargetMissing,
    Request(EngineRequest),
}

pub struct Dispatcher {
    page: Arc<dyn DomPage>,
    catalog: SelectorCatalog,
    playback: Arc<dyn SpeechPlayback>,
    surface: Arc<dyn FeedbackSurface>,
    feedback_level: FeedbackLevel,
}

impl Dispatcher {
    pub fn new(
        page: Arc<dyn DomPage>,
        catalog: SelectorCatalog,
        playback: Arc<dyn SpeechPlayback>,
        surface: Arc<dyn FeedbackSurface>,
        feedback_level: FeedbackLevel,
    ) -> Self {
        Self {
            page,
            catalog,
            playback,
            surface,
            feedback_level,
        }
    }

    pub fn set_feedback_level(&mut self, level: FeedbackLevel) {
        self.feedback_level = level;
    }

    /// Runs one resolution outcome to completion. Never panics and never
    /// leaves the session in an inconsistent state; recognition errors stay
    /// local to this call.
    pub fn dispatch(&self, resolution: &Resolution<'_>) -> Dispatched {
        match resolution {
            Resolution::NoMatch => {
                self.emit(NO_MATCH_APOLOGY, NO_MATCH_TOAST, FeedbackKind::Error);
                self.surface.show_status(NO_MATCH_STATUS, Some(ERROR_EXPIRY));
                Dispatched {
                    outcome: DispatchOutcome::NoMatch,
                    request: None,
                }
            }
            Resolution::Matched { command, param } => {
                debug!("dispatching '{}' ({:?})", command.pattern, command.origin);
                match self.perform(&command.action, param.as_deref()) {
                    Performed::Done(value) => {
                        let value = value.or_else(|| param.clone());
                        self.emit(
                            &fill(&command.ok.speak, value.as_deref()),
                            &fill(&command.ok.toast, value.as_deref()),
                            FeedbackKind::Success,
                        );
                        Dispatched {
                            outcome: DispatchOutcome::Completed,
                            request: None,
                        }
                    }
                    Performed::TargetMissing => {
                        info!("target not found for '{}'", command.pattern);
                        let (speak, toast) = match &command.err {
                            Some(err) => (err.speak.as_str(), err.toast.as_str()),
                            None => ("Sorry, I couldn't do that", "Target not found"),
                        };
                        self.emit(speak, toast, FeedbackKind::Error);
                        Dispatched {
                            outcome: DispatchOutcome::TargetMissing,
                            request: None,
                        }
                    }
                    Performed::Request(request) => {
                        self.emit(&command.ok.speak, &command.ok.toast, FeedbackKind::Success);
                        Dispatched {
                            outcome: DispatchOutcome::Completed,
                            request: Some(request),
                        }
                    }
                }
            }
        }
    }

    /// Emits the one feedback event for this invocation: toast always,
    /// speech gated by the feedback level.
    fn emit(&self, speak: &str, toast: &str, kind: FeedbackKind) {
        let spoken = match self.feedback_level {
            FeedbackLevel::Full => true,
            FeedbackLevel::Minimal => kind == FeedbackKind::Error,
            FeedbackLevel::Silent => false,
        };
        if spoken {
            self.playback.speak(speak);
        }
        self.surface.show_toast(toast, kind);
        debug!(
            "feedback: {:?}",
            FeedbackEvent {
                message: toast.to_string(),
                kind,
                spoken,
            }
        );
    }

    fn perform(&self, action: &PageAction, param: Option<&str>) -> Performed {
        match action {
            PageAction::Navigate(path) => {
                self.page.navigate(path);
                Performed::Done(None)
            }
            PageAction::HistoryBack => {
                self.page.history_back();
                Performed::Done(None)
            }
            PageAction::Reload => {
                self.page.reload();
                Performed::Done(None)
            }
            PageAction::ScrollBy(delta) => {
                self.page.scroll_by(*delta);
                Performed::Done(None)
            }
            PageAction::Scroll(target) => {
                self.page.scroll_to(*target);
                Performed::Done(None)
            }
            PageAction::ClickIntent(intent) => match self.resolve(intent) {
                Some(node) if self.page.click(node) => Performed::Done(None),
                _ => Performed::TargetMissing,
            },
            PageAction::ClickLinkContaining(needle) => {
                match self.find_link(needle) {
                    Some(node) if self.page.click(node) => Performed::Done(None),
                    _ => Performed::TargetMissing,
                }
            }
            PageAction::ReadIntent(intent) => {
                match self.resolve(intent).and_then(|n| self.page.text(n)) {
                    Some(text) => Performed::Done(Some(text)),
                    None => Performed::TargetMissing,
                }
            }
            PageAction::SearchSubmit(intent) => {
                let query = param.unwrap_or_default();
                match self.resolve(intent) {
                    Some(node) if self.page.set_value(node, query) => {
                        self.page.submit_enclosing_form(node);
                        Performed::Done(Some(query.to_string()))
                    }
                    _ => Performed::TargetMissing,
                }
            }
            PageAction::FocusIntent { intent, require } => {
                if let Some(required) = require {
                    if self.resolve(required).is_none() {
                        return Performed::TargetMissing;
                    }
                }
                match self.resolve(intent) {
                    Some(node) if self.page.focus(node) => Performed::Done(None),
                    _ => Performed::TargetMissing,
                }
            }
            PageAction::MediaPlay(intent) => match self.resolve(intent) {
                Some(node) if self.page.play_media(node) => Performed::Done(None),
                _ => Performed::TargetMissing,
            },
            PageAction::MediaPause(intent) => match self.resolve(intent) {
                Some(node) if self.page.pause_media(node) => Performed::Done(None),
                _ => Performed::TargetMissing,
            },
            // Node actions re-validate the handle captured at discovery
            // time; the page may have churned since the scan.
            PageAction::ClickNode(node) => self.on_node(*node, |p, n| p.click(n)),
            PageAction::FocusNode(node) => self.on_node(*node, |p, n| p.focus(n)),
            PageAction::CheckNode(node) => self.on_node(*node, |p, n| p.set_checked(n, true)),
            PageAction::OpenSelectNode(node) => self.on_node(*node, |p, n| p.open_options(n)),
            PageAction::ShowHelp => {
                self.surface.toggle_help_panel();
                Performed::Done(None)
            }
            PageAction::ShowSettings => {
                self.surface.toggle_settings_panel();
                Performed::Done(None)
            }
            PageAction::StopListening => Performed::Request(EngineRequest::StopListening),
        }
    }

    fn resolve(&self, intent: &str) -> Option<NodeId> {
        self.catalog.resolve(&*self.page, intent)
    }

    fn find_link(&self, needle: &str) -> Option<NodeId> {
        self.page.query_all("a").into_iter().find(|&node| {
            let in_text = self
                .page
                .text(node)
                .is_some_and(|t| t.to_lowercase().contains(needle));
            let in_href = self
                .page
                .attr(node, "href")
                .is_some_and(|h| h.to_lowercase().contains(needle));
            in_text || in_href
        })
    }

    fn on_node(&self, node: NodeId, apply: impl Fn(&dyn DomPage, NodeId) -> bool) -> Performed {
        if self.page.is_attached(node) && apply(&*self.page, node) {
            Performed::Done(None)
        } else {
            Performed::TargetMissing
        }
    }
}

/// Fills the single optional `{}` placeholder of a feedback template.
fn fill(template: &str, value: Option<&str>) -> String {
    match value {
        Some(value) if template.contains("{}") => template.replacen("{}", value, 1),
        _ => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_single_placeholder() {
        assert_eq!(fill("Searching for {}", Some("red shoes")), "Searching for red shoes");
        assert_eq!(fill("Added to Cart", Some("x")), "Added to Cart");
        assert_eq!(fill("Total: {}", None), "Total: {}");
    }
}
