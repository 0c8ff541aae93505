//! Configuration loading from TOML files and environment variables.
//!
//! Config is resolved in this order of precedence (highest wins):
//! 1. CLI flags (`--tmux-bin`, `--log-level`), applied by the entry point
//! 2. Environment variables (`MUXPAL_TMUX_BIN`, `MUXPAL_LOG`)
//! 3. TOML file specified via --config CLI flag
//! 4. ./muxpal.toml in the current directory
//! 5. $XDG_CONFIG_HOME/muxpal/muxpal.toml (or ~/.config/muxpal/muxpal.toml)
//! 6. Built-in defaults
//!
//! None of the tool handlers read configuration themselves; everything a
//! handler needs travels through the types it is constructed with.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_TMUX_BIN: &str = "tmux";
const DEFAULT_LOG_FILTER: &str = "info";

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub tmux: TmuxConfig,
    pub log: LogConfig,
}

/// tmux invocation settings stored under `[tmux]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TmuxConfig {
    /// Program to invoke. Only the program is configurable; the argument
    /// shapes the server sends are fixed.
    pub bin: String,
}

impl Default for TmuxConfig {
    fn default() -> Self {
        Self {
            bin: DEFAULT_TMUX_BIN.into(),
        }
    }
}

/// Logging settings stored under `[log]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// tracing env-filter directive, e.g. "info" or "muxpal=debug".
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

/// Raw TOML file shape.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    tmux: TmuxConfig,
    log: LogConfig,
}

impl Config {
    /// Apply CLI flag overrides (highest precedence). Blank values are
    /// ignored rather than clobbering the resolved settings.
    pub fn apply_cli_overrides(&mut self, tmux_bin: Option<&str>, log_level: Option<&str>) {
        if let Some(bin) = tmux_bin.and_then(normalized_string) {
            self.tmux.bin = bin;
        }
        if let Some(filter) = log_level.and_then(normalized_string) {
            self.log.filter = filter;
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    let config_text = if let Some(p) = path_override {
        // An explicitly requested path must exist.
        std::fs::read_to_string(p)?
    } else if let Ok(text) = std::fs::read_to_string("muxpal.toml") {
        text
    } else if let Some(dir) = config_root_dir() {
        let global = dir.join("muxpal").join("muxpal.toml");
        std::fs::read_to_string(global).unwrap_or_default()
    } else {
        String::new()
    };

    let mut config = parse_config_text(&config_text)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    if config.tmux.bin.trim().is_empty() {
        return Err(ConfigError::Invalid("tmux.bin cannot be empty".into()));
    }
    if config.log.filter.trim().is_empty() {
        return Err(ConfigError::Invalid("log.filter cannot be empty".into()));
    }

    Ok(config)
}

fn parse_config_text(config_text: &str) -> Result<Config, ConfigError> {
    let parsed: FileConfig = toml::from_str(config_text)?;
    Ok(Config {
        tmux: parsed.tmux,
        log: parsed.log,
    })
}

/// Environment variable overrides for active runtime settings. The env
/// accessor is injected so tests don't have to mutate process state.
fn apply_env_overrides(config: &mut Config, env: impl Fn(&str) -> Option<String>) {
    if let Some(bin) = env("MUXPAL_TMUX_BIN").as_deref().and_then(normalized_string) {
        config.tmux.bin = bin;
    }
    if let Some(filter) = env("MUXPAL_LOG").as_deref().and_then(normalized_string) {
        config.log.filter = filter;
    }
}

fn normalized_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Resolve the per-user config directory root (`~/.config` by default).
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
