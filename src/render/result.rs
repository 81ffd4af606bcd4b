use serde::Serialize;

use super::format_percent;
use crate::client::{ScanResult, Verdict};

pub const PHISHING_ICON: &str = "⚠️";
pub const SAFE_ICON: &str = "✅";
pub const PHISHING_TITLE: &str = "Phishing Detected";
pub const SAFE_TITLE: &str = "Safe URL";

/// Display state of the result card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub url: String,
    pub verdict: Verdict,
    pub icon: &'static str,
    pub title: &'static str,
    /// Probability bar width in percent, `0.0..=100.0`.
    pub fill_pct: f64,
    /// `danger` or `safe`.
    pub fill_class: &'static str,
    /// `phishing` or `safe`.
    pub card_class: &'static str,
    /// One-decimal percentage, e.g. `87.0%`.
    pub probability_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Map a scan result for `url` to its result card.
pub fn render_result(url: &str, result: &ScanResult) -> ResultView {
    let verdict = result.verdict();
    let phishing = verdict.is_phishing();

    ResultView {
        url: url.to_string(),
        verdict,
        icon: if phishing { PHISHING_ICON } else { SAFE_ICON },
        title: if phishing { PHISHING_TITLE } else { SAFE_TITLE },
        fill_pct: (result.probability * 100.0).clamp(0.0, 100.0),
        fill_class: if phishing { "danger" } else { "safe" },
        card_class: if phishing { "phishing" } else { "safe" },
        probability_text: format_percent(result.probability),
        note: result.note.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phishing_result_uses_danger_palette() {
        let view = render_result("http://evil.example", &ScanResult::new(1, 0.87));
        assert_eq!(view.verdict, Verdict::Phishing);
        assert_eq!(view.icon, PHISHING_ICON);
        assert_eq!(view.title, "Phishing Detected");
        assert_eq!(view.fill_class, "danger");
        assert_eq!(view.card_class, "phishing");
        assert_eq!(view.probability_text, "87.0%");
        assert!((view.fill_pct - 87.0).abs() < 1e-9);
        assert_eq!(view.url, "http://evil.example");
    }

    #[test]
    fn safe_result_uses_safe_palette() {
        let view = render_result("example.com", &ScanResult::new(0, 0.12));
        assert_eq!(view.verdict, Verdict::Safe);
        assert_eq!(view.icon, SAFE_ICON);
        assert_eq!(view.title, "Safe URL");
        assert_eq!(view.fill_class, "safe");
        assert_eq!(view.card_class, "safe");
        assert_eq!(view.probability_text, "12.0%");
    }

    #[test]
    fn note_is_carried_through() {
        let mut result = ScanResult::new(0, 0.01);
        result.note = Some("Top safe site".to_string());
        let view = render_result("google.com", &result);
        assert_eq!(view.note.as_deref(), Some("Top safe site"));
        assert_eq!(view.probability_text, "1.0%");
    }

    #[test]
    fn fill_is_clamped() {
        let view = render_result("x", &ScanResult::new(1, 1.3));
        assert_eq!(view.fill_pct, 100.0);
    }
}
