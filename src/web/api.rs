//! JSON API handlers for the browser surface.
//!
//! Scan and clear requests go through the controller exactly like the
//! terminal surface's events; every handler answers with the view state the
//! controller left behind.

use serde::{Deserialize, Serialize};

use super::WebController;
use crate::client::PredictionClient;
use crate::store::KeyValueStore;
use crate::ui::{UiEvent, ViewState};

/// `POST /api/scan` body.
#[derive(Debug, Deserialize)]
struct ScanRequest {
    url: String,
}

/// `GET /api/health` response.
#[derive(Debug, Serialize)]
pub(super) struct HealthResponse {
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    history_entries: usize,
}

/// Extract the raw input from a scan request body.
pub(super) fn parse_scan_request(body: &str) -> Option<String> {
    serde_json::from_str::<ScanRequest>(body)
        .ok()
        .map(|req| req.url)
}

pub(super) fn state<C, S>(controller: &WebController<C, S>) -> ViewState
where
    C: PredictionClient,
    S: KeyValueStore,
{
    controller.ui().state().clone()
}

pub(super) fn scan<C, S>(controller: &mut WebController<C, S>, input: String) -> ViewState
where
    C: PredictionClient,
    S: KeyValueStore,
{
    controller.handle(UiEvent::Submit(input));
    state(controller)
}

pub(super) fn clear_history<C, S>(controller: &mut WebController<C, S>) -> ViewState
where
    C: PredictionClient,
    S: KeyValueStore,
{
    controller.handle(UiEvent::ClearHistory);
    state(controller)
}

pub(super) fn health<C, S>(controller: &WebController<C, S>) -> HealthResponse
where
    C: PredictionClient,
    S: KeyValueStore,
{
    let history_entries = controller.history().len();
    match controller.client().probe() {
        Ok(status) => HealthResponse {
            reachable: true,
            status: Some(status),
            error: None,
            history_entries,
        },
        Err(e) => HealthResponse {
            reachable: false,
            status: None,
            error: Some(format!("{e:#}")),
            history_entries,
        },
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;
    use crate::client::ScanResult;
    use crate::controller::{BACKEND_ERROR_MESSAGE, Controller};
    use crate::store::{HistoryStore, MemoryStore};
    use crate::ui::SnapshotUi;

    struct DownClient;

    impl PredictionClient for DownClient {
        fn predict(&self, _url: &str) -> Result<ScanResult> {
            anyhow::bail!("connection refused")
        }

        fn probe(&self) -> Result<u16> {
            anyhow::bail!("connection refused")
        }
    }

    fn controller() -> WebController<DownClient, MemoryStore> {
        let store = HistoryStore::new(MemoryStore::new(), "phishingDetectorHistory");
        Controller::new(DownClient, store, SnapshotUi::new())
    }

    #[test]
    fn parse_scan_request_requires_url_string() {
        assert_eq!(parse_scan_request(r#"{"url": "a.example"}"#).as_deref(), Some("a.example"));
        assert!(parse_scan_request(r#"{"url": 5}"#).is_none());
        assert!(parse_scan_request("").is_none());
    }

    #[test]
    fn failed_scan_reports_banner_in_state() {
        let mut c = controller();
        let view = scan(&mut c, "a.example".to_string());
        assert_eq!(view.error.as_deref(), Some(BACKEND_ERROR_MESSAGE));
        assert!(view.result.is_none());
        assert!(!view.loading);
        assert_eq!(view.button_label, "🔍 Scan URL");
    }

    #[test]
    fn health_reports_unreachable_service() {
        let c = controller();
        let report = health(&c);
        assert!(!report.reachable);
        assert!(report.error.unwrap().contains("connection refused"));
        assert_eq!(report.history_entries, 0);
    }
}
