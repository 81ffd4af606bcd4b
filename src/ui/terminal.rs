use std::io::Write;

use colored::Colorize;

use super::UiBinding;
use crate::render::{HistoryItemView, ResultView, SCANNING_LABEL};

/// Width of the probability bar in characters.
const BAR_WIDTH: usize = 30;

/// Append-only terminal surface.
///
/// A terminal can't take text back, so the `hide_*` calls are no-ops and
/// every `show_*` prints a fresh block. Output errors are ignored: a closed
/// pipe must not turn a finished scan into a failure.
pub struct TerminalUi<W: Write> {
    out: W,
    print_history: bool,
}

impl<W: Write> TerminalUi<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            print_history: true,
        }
    }

    /// Skip history redraws (one-shot `phishscan scan`).
    pub fn without_history(mut self) -> Self {
        self.print_history = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> UiBinding for TerminalUi<W> {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            let _ = writeln!(self.out, "{}", SCANNING_LABEL.dimmed());
        }
    }

    fn show_error(&mut self, message: &str) {
        let _ = writeln!(self.out, "{}", message.red().bold());
    }

    fn hide_error(&mut self) {}

    fn show_result(&mut self, view: &ResultView) {
        let title = if view.verdict.is_phishing() {
            view.title.red().bold()
        } else {
            view.title.green().bold()
        };
        let bar = probability_bar(view.fill_pct, BAR_WIDTH);
        let bar = if view.verdict.is_phishing() {
            bar.red()
        } else {
            bar.green()
        };

        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "  {} {}", view.icon, title);
        let _ = writeln!(self.out, "  {}", view.url.dimmed());
        let _ = writeln!(self.out, "  {} {}", bar, view.probability_text.bold());
        if let Some(note) = &view.note {
            let _ = writeln!(self.out, "  {}", note.cyan());
        }
        let _ = writeln!(self.out);
    }

    fn hide_result(&mut self) {}

    fn show_history(&mut self, items: &[HistoryItemView]) {
        if !self.print_history {
            return;
        }
        let _ = writeln!(self.out, "{}", "Scan History".bold().cyan());
        let _ = writeln!(self.out, "{}", "=".repeat(60));
        for item in items {
            let _ = writeln!(self.out, "{}", format_history_line(item));
        }
        let _ = writeln!(self.out);
    }

    fn hide_history(&mut self) {
        if self.print_history {
            let _ = writeln!(self.out, "{}", "History is empty.".dimmed());
        }
    }

    fn clear_input(&mut self) {}
}

/// One history row: icon, status, confidence, time, URL.
pub fn format_history_line(item: &HistoryItemView) -> String {
    let status = if item.verdict.is_phishing() {
        format!("{:<8}", item.status).red()
    } else {
        format!("{:<8}", item.status).green()
    };
    format!(
        "  {} {} {:>6} confidence  {}  {}",
        item.icon,
        status,
        item.confidence,
        item.timestamp.dimmed(),
        item.url
    )
}

/// Text progress bar, `pct` in `[0, 100]`.
fn probability_bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}
