//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the values it is handed
//! (a [`Toolchain`] and a [`DuplicateGuard`]).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `GRAFT_<SECTION>__<KEY>`, e.g.
//!    `GRAFT_APPLY__INJECT_GUARD=always` or
//!    `GRAFT_TOOLCHAIN__TASK="bundle exec rails"`
//! 3. Config file (`--config FILE`, or [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use graft_core::domain::{DuplicateGuard, Toolchain};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "GRAFT";
const TOOLCHAIN_KEYS: [&str; 3] = ["toolchain.install", "toolchain.generate", "toolchain.task"];
/// Keys that may be absent from the defaults.
const OPTIONAL_KEYS: [&str; 1] = ["recipes.dir"];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recipe application settings.
    pub apply: ApplyConfig,
    /// Commands used for installs, generators and tasks.
    pub toolchain: Toolchain,
    /// Where user recipes live.
    pub recipes: RecipesConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    pub inject_guard: DuplicateGuard,
    /// Behave as if `--yes` was always passed.
    pub assume_yes: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipesConfig {
    /// Directory scanned for `*.toml` recipes, in addition to the built-ins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `GRAFT_*`
    /// environment variables.
    ///
    /// With `must_exist`, an explicit `config_file` has to be there; the
    /// default location is always optional.
    pub fn load(config_file: Option<&PathBuf>, must_exist: bool) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        let file = File::from(path.as_path())
            .format(FileFormat::Toml)
            .required(must_exist && config_file.is_some());

        let mut env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(" ");
        for key in TOOLCHAIN_KEYS {
            env = env.with_list_parse_key(key);
        }

        Self::layered()?
            .add_source(file)
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Parse config file text on top of the defaults, ignoring the
    /// environment.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Self::layered()?
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .context("Failed to parse configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn layered() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?;
        Ok(Config::builder().add_source(defaults))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.graft.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "graft")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".graft.toml"))
    }

    /// The file `--config` points at, or the default location.
    pub fn active_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(Self::config_path, Path::to_path_buf)
    }

    /// The configuration as a TOML tree, for dotted-key access.
    pub fn to_table(&self) -> anyhow::Result<toml::Table> {
        match toml::Value::try_from(self).context("Failed to serialise configuration")? {
            toml::Value::Table(table) => Ok(table),
            other => anyhow::bail!("Configuration serialised as {}", other.type_str()),
        }
    }

    /// Look up a dotted key such as `toolchain.install`.
    pub fn get(&self, key: &str) -> anyhow::Result<Option<toml::Value>> {
        let table = self.to_table()?;
        let mut parts = key.split('.');
        let Some(first) = parts.next() else {
            return Ok(None);
        };
        let mut current = table.get(first);
        for part in parts {
            current = current.and_then(|value| value.get(part));
        }
        Ok(current.cloned())
    }
}

/// Set `key` in a config file tree. `value` is typed after the current value
/// of the key in `reference`: booleans parse as booleans, arrays split on
/// whitespace, everything else stays a string.
pub fn set_value(
    table: &mut toml::Table,
    reference: &AppConfig,
    key: &str,
    value: &str,
) -> anyhow::Result<()> {
    let current = match reference.get(key)? {
        Some(current) => current,
        None if OPTIONAL_KEYS.contains(&key) => toml::Value::String(String::new()),
        None => anyhow::bail!("Unknown config key: '{key}'"),
    };

    let new_value = match current {
        toml::Value::Boolean(_) => toml::Value::Boolean(
            value
                .parse()
                .with_context(|| format!("'{key}' expects true or false, got '{value}'"))?,
        ),
        toml::Value::Array(_) => toml::Value::Array(
            value
                .split_whitespace()
                .map(|part| toml::Value::String(part.to_string()))
                .collect(),
        ),
        toml::Value::Table(_) => anyhow::bail!("'{key}' is a section, not a value"),
        _ => toml::Value::String(value.to_string()),
    };

    let mut parts: Vec<&str> = key.split('.').collect();
    let Some(leaf) = parts.pop() else {
        anyhow::bail!("Empty config key");
    };
    let mut section = table;
    for part in parts {
        section = section
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::Table::new()))
            .as_table_mut()
            .ok_or_else(|| anyhow::anyhow!("'{part}' is not a section"))?;
    }
    section.insert(leaf.to_string(), new_value);
    Ok(())
}
