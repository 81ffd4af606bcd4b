//! Application controller.
//!
//! Owns the scan history and drives one scan cycle per submission:
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ ResultDisplayed
//!                     │
//!                     └──err──▶ ErrorDisplayed
//! ```
//!
//! Any terminal state goes back to `Loading` on the next non-empty
//! submission. Blank submissions are ignored. The prediction call is the
//! only blocking point; rendering and persistence run to completion in
//! between, always on the caller's thread.

use std::time::Instant;

use crate::analytics::{EventLog, ScanEvent};
use crate::client::PredictionClient;
use crate::render::{render_history, render_result};
use crate::store::{HistoryEntry, HistoryStore, KeyValueStore};
use crate::ui::{UiBinding, UiEvent};

/// Banner shown for every backend failure.
pub const BACKEND_ERROR_MESSAGE: &str =
    "Error connecting to backend! Make sure the prediction server is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading,
    ResultDisplayed,
    ErrorDisplayed,
}

pub struct Controller<C, S, U> {
    client: C,
    store: HistoryStore<S>,
    ui: U,
    events: EventLog,
    history: Vec<HistoryEntry>,
    state: ControllerState,
}

impl<C, S, U> Controller<C, S, U>
where
    C: PredictionClient,
    S: KeyValueStore,
    U: UiBinding,
{
    /// Load the stored history and draw it.
    pub fn new(client: C, store: HistoryStore<S>, ui: U) -> Self {
        Self::with_event_log(client, store, ui, EventLog::disabled())
    }

    pub fn with_event_log(client: C, store: HistoryStore<S>, mut ui: U, events: EventLog) -> Self {
        let history = match store.read() {
            Ok(stored) => stored.unwrap_or_default(),
            Err(err) => {
                events.record(&ScanEvent::history_load_failed(&err));
                Vec::new()
            }
        };

        draw_history(&mut ui, &history);

        Self {
            client,
            store,
            ui,
            events,
            history,
            state: ControllerState::Idle,
        }
    }

    /// Dispatch a surface event.
    pub fn handle(&mut self, event: UiEvent) -> ControllerState {
        match event {
            UiEvent::Submit(input) => self.submit(&input),
            UiEvent::ClearHistory => self.clear_history(),
        }
        self.state
    }

    /// Run one scan cycle for `input`. Blank input is a no-op.
    pub fn submit(&mut self, input: &str) {
        let url = input.trim();
        if url.is_empty() {
            return;
        }

        self.state = ControllerState::Loading;
        self.ui.set_loading(true);
        self.ui.hide_error();
        self.ui.hide_result();

        let started = Instant::now();
        let outcome = self.client.predict(url);
        let latency_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => {
                self.events
                    .record(&ScanEvent::result(url, &result, latency_ms));
                self.ui.show_result(&render_result(url, &result));
                self.history.insert(0, HistoryEntry::capture(url, &result));
                self.persist();
                draw_history(&mut self.ui, &self.history);
                self.state = ControllerState::ResultDisplayed;
            }
            Err(err) => {
                self.events
                    .record(&ScanEvent::error(url, &err, latency_ms));
                self.ui.show_error(BACKEND_ERROR_MESSAGE);
                self.state = ControllerState::ErrorDisplayed;
            }
        }

        self.ui.set_loading(false);
        self.ui.clear_input();
    }

    /// Empty the history, persist the empty list and hide the section.
    pub fn clear_history(&mut self) {
        self.history.clear();
        if let Err(err) = self.store.clear() {
            self.events.record(&ScanEvent::persist_failed(&err));
        }
        self.events.record(&ScanEvent::history_cleared());
        draw_history(&mut self.ui, &self.history);
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// In-memory history, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Redraw the history from memory.
    pub fn redraw_history(&mut self) {
        draw_history(&mut self.ui, &self.history);
    }

    fn persist(&mut self) {
        // The in-memory list stays authoritative if the write fails; the
        // next successful write brings storage back in sync.
        if let Err(err) = self.store.save(&self.history) {
            self.events.record(&ScanEvent::persist_failed(&err));
        }
    }
}

fn draw_history<U: UiBinding>(ui: &mut U, history: &[HistoryEntry]) {
    match render_history(history) {
        Some(items) => ui.show_history(&items),
        None => ui.hide_history(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use anyhow::Result;

    use super::*;
    use crate::client::ScanResult;
    use crate::store::MemoryStore;
    use crate::ui::SnapshotUi;

    const KEY: &str = "phishingDetectorHistory";

    struct CountingClient {
        calls: Cell<usize>,
    }

    impl PredictionClient for CountingClient {
        fn predict(&self, _url: &str) -> Result<ScanResult> {
            self.calls.set(self.calls.get() + 1);
            Ok(ScanResult::new(0, 0.3))
        }
    }

    #[test]
    fn starts_idle_with_stored_history_drawn() {
        let stored = r#"[{"url":"a.example","prediction":1,"probability":0.9,"timestamp":"08:00:00"}]"#;
        let store = HistoryStore::new(MemoryStore::new().with_value(KEY, stored), KEY);
        let client = CountingClient { calls: Cell::new(0) };

        let controller = Controller::new(client, store, SnapshotUi::new());
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(controller.history().len(), 1);
        let rows = controller.ui().state().history.as_ref().unwrap();
        assert_eq!(rows[0].url, "a.example");
    }

    #[test]
    fn banner_names_the_prediction_server() {
        assert_eq!(
            BACKEND_ERROR_MESSAGE,
            "Error connecting to backend! Make sure the prediction server is running."
        );
    }

    #[test]
    fn blank_submission_is_a_no_op() {
        let client = CountingClient { calls: Cell::new(0) };
        let store = HistoryStore::new(MemoryStore::new(), KEY);
        let mut controller = Controller::new(&client, store, SnapshotUi::new());

        assert_eq!(controller.handle(UiEvent::Submit("   \t".into())), ControllerState::Idle);
        assert_eq!(client.calls.get(), 0);
        assert_eq!(controller.ui().inputs_cleared(), 0);
        assert_eq!(controller.ui().loads_started(), 0);
    }

    #[test]
    fn submitted_url_is_trimmed() {
        let client = CountingClient { calls: Cell::new(0) };
        let store = HistoryStore::new(MemoryStore::new(), KEY);
        let mut controller = Controller::new(&client, store, SnapshotUi::new());

        controller.submit("  example.com \n");
        assert_eq!(controller.history()[0].url, "example.com");
        assert_eq!(controller.ui().state().result.as_ref().unwrap().url, "example.com");
    }
}
