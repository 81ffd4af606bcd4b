use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::ScanEvent;
use crate::config::PhishscanConfig;

/// Event log file name inside the storage directory.
pub const EVENTS_FILE: &str = "events.jsonl";

/// Append-only JSONL event log. A disabled log drops every event.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    /// Log to `<storage dir>/events.jsonl` unless logging is turned off.
    pub fn from_config(config: &PhishscanConfig) -> Self {
        if !config.logging.enabled {
            return Self::disabled();
        }
        Self {
            path: config
                .storage
                .resolved_dir()
                .map(|dir| dir.join(EVENTS_FILE)),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one event. Best-effort: failures are silently ignored.
    pub fn record(&self, event: &ScanEvent) {
        let _ = self.append(event);
    }

    fn append(&self, event: &ScanEvent) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let json = serde_json::to_string(event)?;
        writeln!(file, "{json}")?;

        Ok(())
    }

    /// Read all events, oldest first.
    ///
    /// Silently skips malformed lines. Returns an empty vec if the file does
    /// not exist or cannot be read.
    pub fn read_all(&self) -> Vec<ScanEvent> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str::<ScanEvent>(&line).ok())
            .collect()
    }

    /// The last `limit` events, oldest first.
    pub fn read_recent(&self, limit: usize) -> Vec<ScanEvent> {
        let mut events = self.read_all();
        let skip = events.len().saturating_sub(limit);
        events.drain(..skip);
        events
    }
}
