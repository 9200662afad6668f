use voxcart_dom::{NodeId, ScrollTarget};

/// Where a command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOrigin {
    Static,
    Discovered,
}

/// Spoken + toast text for one dispatch outcome.
///
/// Texts may contain a single `{}` placeholder filled at dispatch time with
/// the captured parameter or the text read from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackText {
    pub speak: String,
    pub toast: String,
}

impl FeedbackText {
    pub fn new(speak: impl Into<String>, toast: impl Into<String>) -> Self {
        Self {
            speak: speak.into(),
            toast: toast.into(),
        }
    }
}

/// The action a command performs, interpreted by the dispatcher.
///
/// Intent variants locate their target through the selector catalog at
/// dispatch time; node variants hold the handle captured during page
/// discovery and are re-validated before acting.
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    Navigate(&'static str),
    HistoryBack,
    Reload,
    ScrollBy(i32),
    Scroll(ScrollTarget),
    /// Click the first element the catalog resolves for this intent.
    ClickIntent(&'static str),
    /// Click the first link whose text or href contains the needle.
    ClickLinkContaining(&'static str),
    /// Read the resolved element's text aloud.
    ReadIntent(&'static str),
    /// Fill the resolved input with the captured parameter and submit its
    /// form.
    SearchSubmit(&'static str),
    /// Focus the resolved element; `require` must also resolve first.
    FocusIntent {
        intent: &'static str,
        require: Option<&'static str>,
    },
    MediaPlay(&'static str),
    MediaPause(&'static str),
    ClickNode(NodeId),
    FocusNode(NodeId),
    CheckNode(NodeId),
    OpenSelectNode(NodeId),
    ShowHelp,
    ShowSettings,
    StopListening,
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Lowercase key; a `*` marks the capture point of a wildcard pattern.
    pub pattern: String,
    pub capture: bool,
    pub action: PageAction,
    pub origin: CommandOrigin,
    /// Success feedback.
    pub ok: FeedbackText,
    /// Target-not-found feedback; `None` for actions that cannot miss.
    pub err: Option<FeedbackText>,
}

impl Command {
    pub fn new(
        pattern: impl Into<String>,
        action: PageAction,
        origin: CommandOrigin,
        ok: FeedbackText,
    ) -> Self {
        let pattern = pattern.into().to_lowercase();
        let capture = pattern.contains('*');
        Self {
            pattern,
            capture,
            action,
            origin,
            ok,
            err: None,
        }
    }

    pub fn with_err(mut self, err: FeedbackText) -> Self {
        self.err = Some(err);
        self
    }
}
