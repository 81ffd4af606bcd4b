//! UI surface abstraction.
//!
//! The controller never touches concrete widgets. It drives a [`UiBinding`],
//! and the surface feeds user actions back as [`UiEvent`]s through
//! [`crate::controller::Controller::handle`].
//!
//! Two surfaces ship with the crate:
//! - [`terminal::TerminalUi`] prints to a writer (stdout for the CLI)
//! - [`snapshot::SnapshotUi`] keeps the current view state in memory; the
//!   web server serializes it and tests assert against it

pub mod snapshot;
pub mod terminal;

pub use snapshot::{SnapshotUi, ViewState};
pub use terminal::TerminalUi;

use crate::render::{HistoryItemView, ResultView};

/// User actions a surface can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Scan form submitted with the raw input text.
    Submit(String),
    /// Clear-history control activated.
    ClearHistory,
}

/// Display capabilities the controller needs from a surface.
pub trait UiBinding {
    /// Disable (`true`) or re-enable the input and scan controls.
    fn set_loading(&mut self, loading: bool);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    fn show_result(&mut self, view: &ResultView);
    fn hide_result(&mut self);
    /// Redraw the history list; `items` is never empty.
    fn show_history(&mut self, items: &[HistoryItemView]);
    fn hide_history(&mut self);
    fn clear_input(&mut self);
}
