use anyhow::Result;
use clap::{Parser, Subcommand};

use phishscan::cli;

#[derive(Debug, Parser)]
#[command(name = "phishscan")]
#[command(about = "Check URLs against a phishing classification service")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify one URL and print the verdict
    Scan {
        /// The URL to check
        url: String,
    },
    /// Prompt for URLs until :quit or end of input
    Interactive,
    /// Show the stored scan history, newest first
    History {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Delete the stored scan history
    Clear,
    /// Check the prediction service, config and storage
    Health,
    /// Show recent scan events
    Log {
        /// Number of events to show
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Serve the scanner in the browser
    Web {
        /// Bind address (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.phishscan/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `endpoint.url`
    Set { key: String, value: String },
    /// Overwrite the global config with defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Scan { url } => cli::run_scan(&url),
        Commands::Interactive => cli::run_interactive(),
        Commands::History { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_history(fmt)
        }
        Commands::Clear => cli::run_clear(),
        Commands::Health => cli::run_health(),
        Commands::Log { limit, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_log(limit, fmt)
        }
        Commands::Web { addr } => cli::run_web(addr.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
