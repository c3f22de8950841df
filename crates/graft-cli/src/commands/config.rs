//! `graft config`: read and write configuration values.

use std::path::Path;

use tracing::debug;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::{AppConfig, set_value},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = AppConfig::active_path(global.config.as_deref());

    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key).map_err(CliError::config)?.ok_or_else(|| {
                CliError::ConfigError {
                    message: format!("Unknown config key: '{key}'"),
                    source: None,
                }
            })?;
            output.print(&render_value(&value))?;
        }

        ConfigCommands::Set { key, value } => {
            set_in_file(&path, &key, &value)?;
            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

/// Update one key in the config file, creating the file if needed. The
/// result must still load, so a bad value never reaches disk.
fn set_in_file(path: &Path, key: &str, value: &str) -> CliResult<()> {
    let mut table = if path.exists() {
        let text = std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read '{}'", path.display()))?;
        toml::from_str::<toml::Table>(&text).map_err(|e| CliError::ConfigError {
            message: format!("'{}' is not valid TOML: {e}", path.display()),
            source: Some(Box::new(e)),
        })?
    } else {
        toml::Table::new()
    };

    set_value(&mut table, &AppConfig::default(), key, value).map_err(CliError::config)?;

    let text = toml::to_string_pretty(&table).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    AppConfig::from_toml(&text).map_err(CliError::config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;
    debug!(key, path = %path.display(), "config value written");
    Ok(())
}

/// Strings print bare; arrays as space-separated words, matching how `set`
/// reads them.
fn render_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::domain::DuplicateGuard;
    use tempfile::TempDir;

    #[test]
    fn render_value_flattens_arrays() {
        let cfg = AppConfig::default();
        let install = cfg.get("toolchain.install").unwrap().unwrap();
        assert_eq!(render_value(&install), "bundle add");
        let guard = cfg.get("apply.inject_guard").unwrap().unwrap();
        assert_eq!(render_value(&guard), "skip-if-present");
        let yes = cfg.get("apply.assume_yes").unwrap().unwrap();
        assert_eq!(render_value(&yes), "false");
    }

    #[test]
    fn set_creates_file_and_keeps_other_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/graft.toml");

        set_in_file(&path, "apply.inject_guard", "always").unwrap();
        set_in_file(&path, "toolchain.task", "bundle exec rails").unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.apply.inject_guard, DuplicateGuard::Always);
        assert_eq!(cfg.toolchain.task, vec!["bundle", "exec", "rails"]);
    }

    #[test]
    fn set_rejects_values_that_would_not_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("graft.toml");

        let err = set_in_file(&path, "apply.inject_guard", "sometimes").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert!(!path.exists());
    }
}
