//! Page-level application state.

use crate::client::history::{History, TryOnResult};

/// Updates applied to [`AppState`].
#[derive(Debug, Clone)]
pub enum Action {
    /// Flip between light and dark theme.
    ToggleDarkMode,
    /// Show the history drawer.
    OpenHistory,
    /// Hide the history drawer.
    CloseHistory,
    /// Prepend a finished try-on to the history.
    RecordResult(TryOnResult),
    /// Forget every recorded try-on.
    ClearHistory,
}

/// Everything the page keeps in memory outside the try-on tool.
/// Changed only through [`AppState::dispatch`].
#[derive(Debug, Clone, Default)]
pub struct AppState {
    dark_mode: bool,
    history_open: bool,
    history: History,
}

impl AppState {
    /// Light theme, drawer closed, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action.
    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::ToggleDarkMode => self.dark_mode = !self.dark_mode,
            Action::OpenHistory => self.history_open = true,
            Action::CloseHistory => self.history_open = false,
            Action::RecordResult(result) => self.history.record(result),
            Action::ClearHistory => self.history.clear(),
        }
    }

    /// True when the dark theme is on.
    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Class to put on the document root.
    pub fn theme_class(&self) -> Option<&'static str> {
        self.dark_mode.then_some("dark")
    }

    /// True while the history drawer is shown.
    pub fn is_history_open(&self) -> bool {
        self.history_open
    }

    /// Recorded try-ons.
    pub fn history(&self) -> &History {
        &self.history
    }
}
