/// Configuration system for phishscan.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::PhishscanConfig::default()`]
/// 2. **User global config**: `~/.phishscan/config.toml`
/// 3. **Project local config**: `.phishscan.toml` in the current working directory
/// 4. **Environment variables**: `PHISHSCAN_*` overrides (highest precedence)
///
/// Later layers override earlier ones key by key: a project file that only
/// sets `[web]` keeps the endpoint from the global file. Keys no layer sets
/// fall back to built-in defaults.
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::PhishscanConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved phishscan configuration.
///
/// Merges all layers in order: defaults, global TOML, project TOML, env
/// vars.
pub fn load() -> PhishscanConfig {
    let mut config = load_files(global_config_path(), project_config_path());
    apply_env_overrides(&mut config);
    config
}

/// Resolve the file layers only: `project` merged over `global` over the
/// built-in defaults. Environment variables are not consulted.
pub fn load_files(global: Option<PathBuf>, project: Option<PathBuf>) -> PhishscanConfig {
    let mut merged = toml::Value::Table(toml::map::Map::new());

    for layer in [global, project].into_iter().filter_map(load_toml_file) {
        merge_tables(&mut merged, layer);
    }

    // A layer whose values have the wrong types makes the merge unloadable;
    // fall back to defaults as a malformed single file would.
    merged.try_into::<PhishscanConfig>().unwrap_or_default()
}

/// Read a TOML config file as a raw value tree.
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. A broken config file must not stop a scan.
fn load_toml_file(path: Option<PathBuf>) -> Option<toml::Value> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;
    value.is_table().then_some(value)
}

/// Deep-merge `overlay` into `base`. Tables merge recursively; any other
/// value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_tables(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.phishscan/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".phishscan").join("config.toml"))
}

/// Path to the project local config: `.phishscan.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".phishscan.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `PHISHSCAN_ENDPOINT`: prediction endpoint URL
/// - `PHISHSCAN_TIMEOUT_MS`: request timeout (`0` = none)
/// - `PHISHSCAN_STORAGE_DIR`: storage directory
/// - `PHISHSCAN_LOGGING`: event log on/off (`1`/`true`/`yes`/`on`)
/// - `PHISHSCAN_WEB_ADDR`: bind address for `phishscan web`
fn apply_env_overrides(config: &mut PhishscanConfig) {
    if let Ok(val) = std::env::var("PHISHSCAN_ENDPOINT")
        && !val.is_empty()
    {
        config.endpoint.url = val;
    }
    if let Ok(val) = std::env::var("PHISHSCAN_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.endpoint.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("PHISHSCAN_STORAGE_DIR")
        && !val.is_empty()
    {
        config.storage.dir = val;
    }
    if let Ok(val) = std::env::var("PHISHSCAN_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("PHISHSCAN_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.phishscan/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.phishscan/ directory")?;
    }

    fs::write(&path, PhishscanConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Supports dotted keys like `endpoint.url`. When no file exists yet the
/// built-in defaults are written out with the key applied.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&PhishscanConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    // Reject values that would make the file unloadable.
    let updated = toml::to_string_pretty(&root).context("failed to serialize config")?;
    toml::from_str::<PhishscanConfig>(&updated)
        .with_context(|| format!("invalid value for '{key}': {value}"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, updated).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be dotted (section.key), got '{key}'");
    };

    let mut current = root;
    for part in section.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
