//! Scan history persistence.
//!
//! The whole history lives under one key as a JSON array, newest first.
//! Writes always replace the full value; there is no merging and no schema
//! version.
//!
//! Loading fails open: a missing value and a value that doesn't parse both
//! yield an empty history. A corrupted file must never keep the scanner from
//! starting, so [`HistoryStore::load`] never returns an error. Callers that
//! want to report the corruption use [`HistoryStore::read`].

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::client::{ScanResult, Verdict};

/// Persisted record of one past scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub prediction: i64,
    pub probability: f64,
    /// Local capture time, `HH:MM:SS`.
    pub timestamp: String,
}

impl HistoryEntry {
    /// Record a scan captured now.
    pub fn capture(url: &str, result: &ScanResult) -> Self {
        Self {
            url: url.to_string(),
            prediction: result.prediction,
            probability: result.probability,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_prediction(self.prediction)
    }
}

/// Reads and writes the history list through a [`KeyValueStore`].
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Strict read: `Ok(None)` when nothing is stored, `Err` when the stored
    /// value can't be read or parsed.
    pub fn read(&self) -> Result<Option<Vec<HistoryEntry>>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let entries = serde_json::from_str(&raw)
            .with_context(|| format!("stored history under '{}' is not valid", self.key))?;
        Ok(Some(entries))
    }

    /// Fail-open read: the stored history, or empty.
    pub fn load(&self) -> Vec<HistoryEntry> {
        self.read().ok().flatten().unwrap_or_default()
    }

    /// Serialize the full sequence and overwrite the stored value.
    pub fn save(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        let json = serde_json::to_string(entries).context("failed to serialize history")?;
        self.store.set(&self.key, &json)
    }

    /// Equivalent to saving an empty history.
    pub fn clear(&mut self) -> Result<()> {
        self.save(&[])
    }
}
