use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::client::ScanResult;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The service classified a URL.
    Result,
    /// The scan failed (transport, status or response shape).
    Error,
    HistoryCleared,
    /// Stored history was unreadable and replaced by an empty one.
    HistoryLoadFailed,
    /// Writing the history back to storage failed.
    PersistFailed,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Result => write!(f, "result"),
            Self::Error => write!(f, "error"),
            Self::HistoryCleared => write!(f, "history_cleared"),
            Self::HistoryLoadFailed => write!(f, "history_load_failed"),
            Self::PersistFailed => write!(f, "persist_failed"),
        }
    }
}

/// One line of `events.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub timestamp: String,
    #[serde(rename = "outcome")]
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub prediction: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub probability: Option<f64>,
    /// Wall-clock time of the prediction call.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ScanEvent {
    fn new(kind: EventKind) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            kind,
            url: None,
            prediction: None,
            probability: None,
            latency_ms: None,
            error: None,
        }
    }

    pub fn result(url: &str, result: &ScanResult, latency_ms: u64) -> Self {
        Self {
            url: Some(url.to_string()),
            prediction: Some(result.prediction),
            probability: Some(result.probability),
            latency_ms: Some(latency_ms),
            ..Self::new(EventKind::Result)
        }
    }

    pub fn error(url: &str, error: &anyhow::Error, latency_ms: u64) -> Self {
        Self {
            url: Some(url.to_string()),
            latency_ms: Some(latency_ms),
            // `{:#}` keeps the context chain on one line.
            error: Some(format!("{error:#}")),
            ..Self::new(EventKind::Error)
        }
    }

    pub fn history_cleared() -> Self {
        Self::new(EventKind::HistoryCleared)
    }

    pub fn history_load_failed(error: &anyhow::Error) -> Self {
        Self {
            error: Some(format!("{error:#}")),
            ..Self::new(EventKind::HistoryLoadFailed)
        }
    }

    pub fn persist_failed(error: &anyhow::Error) -> Self {
        Self {
            error: Some(format!("{error:#}")),
            ..Self::new(EventKind::PersistFailed)
        }
    }
}
