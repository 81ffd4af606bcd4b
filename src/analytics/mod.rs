//! Scan event log.
//!
//! Every scan outcome and every history mutation is appended as one JSON
//! line to `<storage dir>/events.jsonl`. The log is a diagnostic side
//! channel: writes are best-effort and a failed write never reaches the UI.

pub mod events;
pub mod logger;

pub use events::{EventKind, ScanEvent};
pub use logger::EventLog;
