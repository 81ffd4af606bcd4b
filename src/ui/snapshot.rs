use serde::Serialize;

use super::UiBinding;
use crate::render::{HistoryItemView, ResultView, scan_button_label};

/// Everything a surface currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub loading: bool,
    pub button_label: &'static str,
    pub error: Option<String>,
    pub result: Option<ResultView>,
    /// `None` when the history section is hidden.
    pub history: Option<Vec<HistoryItemView>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: false,
            button_label: scan_button_label(false),
            error: None,
            result: None,
            history: None,
        }
    }
}

/// In-memory surface. Also counts how often the input was cleared and
/// how often loading was toggled on, which the integration tests use.
#[derive(Debug, Clone, Default)]
pub struct SnapshotUi {
    state: ViewState,
    inputs_cleared: usize,
    loads_started: usize,
}

impl SnapshotUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn inputs_cleared(&self) -> usize {
        self.inputs_cleared
    }

    pub fn loads_started(&self) -> usize {
        self.loads_started
    }
}

impl UiBinding for SnapshotUi {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.loads_started += 1;
        }
        self.state.loading = loading;
        self.state.button_label = scan_button_label(loading);
    }

    fn show_error(&mut self, message: &str) {
        self.state.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.state.error = None;
    }

    fn show_result(&mut self, view: &ResultView) {
        self.state.result = Some(view.clone());
    }

    fn hide_result(&mut self) {
        self.state.result = None;
    }

    fn show_history(&mut self, items: &[HistoryItemView]) {
        self.state.history = Some(items.to_vec());
    }

    fn hide_history(&mut self) {
        self.state.history = None;
    }

    fn clear_input(&mut self) {
        self.inputs_cleared += 1;
    }
}
