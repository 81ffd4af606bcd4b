//! Pure mappings from scan data to display state.
//!
//! Nothing here touches a UI surface; the controller hands the resulting
//! views to whatever [`crate::ui::UiBinding`] it was built with.

pub mod history;
pub mod result;

pub use history::{HistoryItemView, render_history};
pub use result::{ResultView, render_result};

/// Scan button label while idle.
pub const SCAN_LABEL: &str = "🔍 Scan URL";

/// Scan button label while a request is in flight.
pub const SCANNING_LABEL: &str = "⚡ Scanning...";

pub fn scan_button_label(loading: bool) -> &'static str {
    if loading { SCANNING_LABEL } else { SCAN_LABEL }
}

/// `probability` as a percentage with one decimal, e.g. `0.87` → `"87.0%"`.
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_percent_uses_one_decimal() {
        assert_eq!(format_percent(0.87), "87.0%");
        assert_eq!(format_percent(0.12), "12.0%");
        assert_eq!(format_percent(0.01), "1.0%");
        assert_eq!(format_percent(0.9567), "95.7%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn button_label_tracks_loading() {
        assert_eq!(scan_button_label(true), "⚡ Scanning...");
        assert_eq!(scan_button_label(false), "🔍 Scan URL");
    }
}
