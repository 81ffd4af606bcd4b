use serde::Serialize;

use super::format_percent;
use super::result::{PHISHING_ICON, SAFE_ICON};
use crate::client::Verdict;
use crate::store::HistoryEntry;

/// One row of the history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItemView {
    pub url: String,
    pub verdict: Verdict,
    pub icon: &'static str,
    /// `Phishing` or `Safe`.
    pub status: &'static str,
    /// One-decimal percentage, e.g. `87.0%`.
    pub confidence: String,
    pub timestamp: String,
    /// `phishing` or `safe`.
    pub class: &'static str,
}

impl HistoryItemView {
    fn from_entry(entry: &HistoryEntry) -> Self {
        let verdict = entry.verdict();
        let phishing = verdict.is_phishing();
        Self {
            url: entry.url.clone(),
            verdict,
            icon: if phishing { PHISHING_ICON } else { SAFE_ICON },
            status: if phishing { "Phishing" } else { "Safe" },
            confidence: format_percent(entry.probability),
            timestamp: entry.timestamp.clone(),
            class: if phishing { "phishing" } else { "safe" },
        }
    }
}

/// Map the history to list rows, preserving order.
///
/// Returns `None` for an empty history: the section is hidden rather than
/// shown empty.
pub fn render_history(entries: &[HistoryEntry]) -> Option<Vec<HistoryItemView>> {
    if entries.is_empty() {
        return None;
    }
    Some(entries.iter().map(HistoryItemView::from_entry).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, prediction: i64, probability: f64, timestamp: &str) -> HistoryEntry {
        HistoryEntry {
            url: url.to_string(),
            prediction,
            probability,
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn empty_history_is_hidden() {
        assert!(render_history(&[]).is_none());
    }

    #[test]
    fn rows_preserve_order_and_fields() {
        let entries = vec![
            entry("c.example", 1, 0.87, "10:02:00"),
            entry("b.example", 0, 0.12, "10:01:00"),
        ];
        let rows = render_history(&entries).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "c.example");
        assert_eq!(rows[0].status, "Phishing");
        assert_eq!(rows[0].confidence, "87.0%");
        assert_eq!(rows[0].class, "phishing");
        assert_eq!(rows[0].timestamp, "10:02:00");
        assert_eq!(rows[1].url, "b.example");
        assert_eq!(rows[1].status, "Safe");
        assert_eq!(rows[1].icon, SAFE_ICON);
        assert_eq!(rows[1].confidence, "12.0%");
    }
}
