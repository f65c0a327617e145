//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Serialized, Toml};
use figment::value::{Dict, Value};
use figment::{Figment, Provider};
use sb_core::MappingTable;
use sb_jira::JiraConfig;
use serde::Deserialize;
use thiserror::Error;

/// Legacy single-file config in the home directory.
const LEGACY_CONFIG_FILE: &str = ".silverbullet.json";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or variable could not be read into [`Config`].
    #[error("invalid config file - please make sure it contains valid JSON or TOML: {0}")]
    Invalid(#[source] figment::Error),
}

/// Application configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the time log.
    pub path: PathBuf,
    /// Shorthand codes used in the log.
    pub mappings: MappingTable,
    pub modes: Modes,
    /// Year the log's day headers belong to. Defaults to the current year.
    pub year: Option<i32>,
    /// Ticket integration. Disabled when absent.
    pub jira: Option<JiraConfig>,
}

/// Operating modes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Modes {
    /// Report only the last day of the log.
    pub latest_only: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("path", &self.path)
            .field("mappings", &self.mappings.len())
            .field("modes", &self.modes)
            .field("year", &self.year)
            .field("jira", &self.jira)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: home.join("time.txt"),
            mappings: MappingTable::default(),
            modes: Modes::default(),
            year: None,
            jira: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later layers win: `~/.silverbullet.json`, then the platform config
    /// file, then `config_path`, then `SB_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();

        if let Some(home) = dirs::home_dir() {
            figment = merge_normalized(figment, Json::file(home.join(LEGACY_CONFIG_FILE)))?;
        }

        if let Some(config_dir) = dirs_config_path() {
            figment = merge_normalized(figment, Toml::file(config_dir.join("config.toml")))?;
        }

        if let Some(path) = config_path {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "config file not found, using defaults");
            }
            figment = merge_file(figment, path)?;
        }

        // Load from environment variables (SB_*), `__` separates nesting.
        figment = figment.merge(Env::prefixed("SB_").split("__"));

        Self::extract(&figment)
    }

    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        let mut config: Self = figment.extract().map_err(ConfigError::Invalid)?;
        config.path = expand_home(&config.path);
        Ok(config)
    }
}

/// Merges a config file, picking the format from its extension.
#[expect(
    clippy::result_large_err,
    reason = "figment::Error is large but only returned at startup"
)]
fn merge_file(figment: Figment, path: &Path) -> Result<Figment, ConfigError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        merge_normalized(figment, Json::file(path))
    } else {
        merge_normalized(figment, Toml::file(path))
    }
}

/// Merges one file layer after rewriting its keys to snake_case.
///
/// figment merges by literal key, so a `latestOnly` from an older file and a
/// `latest_only` from a later one would both survive the merge.
#[expect(
    clippy::result_large_err,
    reason = "figment::Error is large but only returned at startup"
)]
fn merge_normalized(figment: Figment, provider: impl Provider) -> Result<Figment, ConfigError> {
    let mut layer: Dict = Figment::from(provider)
        .extract()
        .map_err(ConfigError::Invalid)?;
    normalize_keys(&mut layer);
    Ok(figment.merge(Serialized::defaults(layer)))
}

/// Renames the camelCase keys of the legacy JSON format.
fn normalize_keys(config: &mut Dict) {
    if let Some(Value::Dict(_, modes)) = config.get_mut("modes") {
        rename_key(modes, "latestOnly", "latest_only");
    }
    if let Some(Value::Dict(_, jira)) = config.get_mut("jira") {
        rename_key(jira, "restUri", "rest_uri");
        rename_key(jira, "ticketPatterns", "ticket_patterns");
    }
    // Keys directly under `mappings` are user shorthands and stay as written.
    if let Some(Value::Dict(_, mappings)) = config.get_mut("mappings") {
        for mapping in mappings.values_mut() {
            if let Value::Dict(_, mapping) = mapping {
                rename_key(mapping, "projectNr", "project_nr");
                rename_key(mapping, "packageNr", "package_nr");
            }
        }
    }
}

/// Moves `from` to `to`; an existing `to` in the same file wins.
fn rename_key(dict: &mut Dict, from: &str, to: &str) {
    if let Some(value) = dict.remove(from) {
        dict.entry(to.to_string()).or_insert(value);
    }
}

/// Replaces a leading `~` with the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Returns the platform-specific config directory for silverbullet.
///
/// On Linux: `~/.config/silverbullet`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("silverbullet"))
}
