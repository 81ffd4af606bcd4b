//! CLI command implementations for phishscan.
//!
//! Provides subcommand handlers for:
//! - `phishscan scan <URL>`: classify one URL
//! - `phishscan interactive`: prompt loop over the same controller
//! - `phishscan history` / `phishscan clear`: inspect or wipe scan history
//! - `phishscan health`: endpoint reachability, config and storage status
//! - `phishscan log`: recent scan events
//! - `phishscan web`: browser surface
//! - `phishscan config show|init|set|reset`: configuration management

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::{EventKind, EventLog, ScanEvent};
use crate::client::{HttpPredictionClient, PredictionClient};
use crate::config::{self, PhishscanConfig};
use crate::controller::{Controller, ControllerState};
use crate::render::{format_percent, render_history};
use crate::store::{FileStore, HistoryEntry, HistoryStore, KeyValueStore};
use crate::ui::terminal::format_history_line;
use crate::ui::{SnapshotUi, TerminalUi, UiBinding, UiEvent};
use crate::web;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

fn open_history(cfg: &PhishscanConfig) -> Result<HistoryStore<FileStore>> {
    let dir = cfg
        .storage
        .resolved_dir()
        .context("could not determine storage directory (no home directory?)")?;
    Ok(HistoryStore::new(
        FileStore::new(dir),
        cfg.storage.history_key.clone(),
    ))
}

fn build_controller<U: UiBinding>(
    cfg: &PhishscanConfig,
    ui: U,
) -> Result<Controller<HttpPredictionClient, FileStore, U>> {
    let client = HttpPredictionClient::from_config(&cfg.endpoint);
    let store = open_history(cfg)?;
    Ok(Controller::with_event_log(
        client,
        store,
        ui,
        EventLog::from_config(cfg),
    ))
}

// ---------------------------------------------------------------------------
// phishscan scan
// ---------------------------------------------------------------------------

/// Classify a single URL and print the result card.
pub fn run_scan(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        println!("{}", "Nothing to scan.".yellow());
        return Ok(());
    }

    let cfg = config::load();
    let ui = TerminalUi::new(io::stdout()).without_history();
    let mut controller = build_controller(&cfg, ui)?;
    scan_once(&mut controller, url)
}

/// Submit `url` and turn a backend failure into an error, after the surface
/// has shown the banner, so the process exits non-zero.
fn scan_once<C, S, U>(controller: &mut Controller<C, S, U>, url: &str) -> Result<()>
where
    C: PredictionClient,
    S: KeyValueStore,
    U: UiBinding,
{
    if controller.handle(UiEvent::Submit(url.to_string())) == ControllerState::ErrorDisplayed {
        anyhow::bail!("scan failed: prediction service unavailable");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// phishscan interactive
// ---------------------------------------------------------------------------

/// A line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Event(UiEvent),
    ShowHistory,
    Help,
    Quit,
}

/// Map a prompt line to a command. Anything not starting with `:` is a URL.
pub fn parse_prompt_line(line: &str) -> PromptCommand {
    match line.trim() {
        ":q" | ":quit" | ":exit" => PromptCommand::Quit,
        ":clear" => PromptCommand::Event(UiEvent::ClearHistory),
        ":history" | ":h" => PromptCommand::ShowHistory,
        ":help" | ":?" => PromptCommand::Help,
        other => PromptCommand::Event(UiEvent::Submit(other.to_string())),
    }
}

/// Read URLs from stdin until `:quit` or end of input.
pub fn run_interactive() -> Result<()> {
    let cfg = config::load();

    println!("{}", "phishscan interactive".bold().cyan());
    println!(
        "{}",
        format!("Endpoint: {}  (:help for commands)", cfg.endpoint.url).dimmed()
    );
    println!();

    let mut controller = build_controller(&cfg, TerminalUi::new(io::stdout()))?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", "url>".bold());
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("failed to read from stdin")?;

        match parse_prompt_line(&line) {
            PromptCommand::Quit => break,
            PromptCommand::Help => print_prompt_help(),
            PromptCommand::ShowHistory => controller.redraw_history(),
            PromptCommand::Event(event) => {
                controller.handle(event);
            }
        }
    }

    Ok(())
}

fn print_prompt_help() {
    println!("  {}    scan a URL", "<url>".bold());
    println!("  {} show scan history", ":history".bold());
    println!("  {}   clear scan history", ":clear".bold());
    println!("  {}    leave", ":quit".bold());
}

// ---------------------------------------------------------------------------
// phishscan history / clear
// ---------------------------------------------------------------------------

/// Print the stored scan history, newest first.
pub fn run_history(format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let entries = open_history(&cfg)?.load();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Csv => print!("{}", history_csv(&entries)),
        OutputFormat::Table => match render_history(&entries) {
            Some(items) => {
                println!("{}", "Scan History".bold().cyan());
                println!("{}", "=".repeat(60));
                for item in &items {
                    println!("{}", format_history_line(item));
                }
            }
            None => println!("{}", "No scans yet.".yellow()),
        },
    }

    Ok(())
}

fn history_csv(entries: &[HistoryEntry]) -> String {
    let mut out = String::from("url,verdict,probability,timestamp\n");
    for entry in entries {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&entry.url),
            entry.verdict(),
            entry.probability,
            csv_field(&entry.timestamp),
        ));
    }
    out
}

/// Quote a CSV field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Wipe the scan history through the controller.
pub fn run_clear() -> Result<()> {
    let cfg = config::load();
    let mut controller = build_controller(&cfg, SnapshotUi::new())?;
    let removed = controller.history().len();

    controller.handle(UiEvent::ClearHistory);

    println!(
        "{} Cleared {} history {}.",
        "✓".green().bold(),
        removed,
        if removed == 1 { "entry" } else { "entries" }
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// phishscan health
// ---------------------------------------------------------------------------

/// Check endpoint reachability, config files and storage.
pub fn run_health() -> Result<()> {
    println!("{}", "phishscan Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.phishscan/config.toml found"
        } else {
            "not found (run `phishscan config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".phishscan.toml found"
        } else {
            "none (optional)"
        },
    );

    let client = HttpPredictionClient::from_config(&cfg.endpoint);
    match client.probe() {
        Ok(status) => print_health_item(
            "Prediction service",
            true,
            &format!("reachable at {} (HTTP {status})", client.endpoint()),
        ),
        Err(e) => print_health_item(
            "Prediction service",
            false,
            &format!("{e:#} (is the server running?)"),
        ),
    }
    print_health_item(
        "Request timeout",
        true,
        &match cfg.endpoint.timeout() {
            Some(t) => format!("{} ms", t.as_millis()),
            None => "none (transport default)".to_string(),
        },
    );

    match open_history(&cfg) {
        Ok(store) => {
            let dir = store.inner().dir().display().to_string();
            match store.read() {
                Ok(entries) => {
                    let count = entries.map(|e| e.len()).unwrap_or(0);
                    print_health_item("History", true, &format!("{count} entries in {dir}"));
                }
                Err(e) => print_health_item(
                    "History",
                    false,
                    &format!("unreadable ({e:#}); it will load as empty"),
                ),
            }
        }
        Err(e) => print_health_item("History", false, &format!("{e:#}")),
    }

    let log = EventLog::from_config(&cfg);
    match log.path() {
        Some(path) => print_health_item(
            "Event log",
            true,
            &format!("{} ({} events)", path.display(), log.read_all().len()),
        ),
        None => print_health_item("Event log", false, "disabled"),
    }

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<20} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// phishscan log
// ---------------------------------------------------------------------------

/// Show the most recent scan events.
pub fn run_log(limit: usize, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let log = EventLog::from_config(&cfg);
    if log.path().is_none() {
        println!("{}", "Event logging is disabled.".yellow());
        return Ok(());
    }

    let events = log.read_recent(limit);
    if events.is_empty() {
        println!("{}", "No events logged yet.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&events)?),
        OutputFormat::Csv => {
            println!("timestamp,outcome,url,prediction,probability,latency_ms,error");
            for e in &events {
                println!(
                    "{},{},{},{},{},{},{}",
                    e.timestamp,
                    e.kind,
                    csv_field(e.url.as_deref().unwrap_or("")),
                    e.prediction.map(|p| p.to_string()).unwrap_or_default(),
                    e.probability.map(|p| p.to_string()).unwrap_or_default(),
                    e.latency_ms.map(|l| l.to_string()).unwrap_or_default(),
                    csv_field(e.error.as_deref().unwrap_or("")),
                );
            }
        }
        OutputFormat::Table => {
            for e in &events {
                println!("{}", format_event_line(e));
            }
        }
    }

    Ok(())
}

fn format_event_line(event: &ScanEvent) -> String {
    let kind = match event.kind {
        EventKind::Result => "result".green(),
        EventKind::Error | EventKind::PersistFailed => event.kind.to_string().red(),
        EventKind::HistoryCleared | EventKind::HistoryLoadFailed => {
            event.kind.to_string().yellow()
        }
    };
    let detail = match (event.prediction, event.probability, &event.error) {
        (Some(p), Some(prob), _) => format!(
            "{} {}",
            crate::client::Verdict::from_prediction(p),
            format_percent(prob)
        ),
        (_, _, Some(err)) => err.clone(),
        _ => String::new(),
    };
    format!(
        "  {} {:<20} {} {}",
        event.timestamp.dimmed(),
        kind,
        truncate(event.url.as_deref().unwrap_or("-"), 40),
        detail
    )
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ---------------------------------------------------------------------------
// phishscan web
// ---------------------------------------------------------------------------

/// Serve the browser surface until interrupted.
pub fn run_web(addr: Option<&str>) -> Result<()> {
    let cfg = config::load();
    let addr = addr.unwrap_or(cfg.web.addr.as_str()).to_string();
    let controller = build_controller(&cfg, SnapshotUi::new())?;
    web::serve(&addr, controller)
}

// ---------------------------------------------------------------------------
// phishscan config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective phishscan Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.phishscan/config.toml", global_exists);
    print_source(".phishscan.toml", project_exists);
    println!("  {} {}", "·".dimmed(), "PHISHSCAN_* environment variables".dimmed());

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Write the default config file.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single key in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset the global config file to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}
