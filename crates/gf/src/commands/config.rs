//! Config command implementation.
//!
//! View and create configuration settings.
//! Config file is located at ~/.config/gf/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use group_filter_rs::FilterConfig;
use owo_colors::OwoColorize;

use super::{CommandContext, CommandError, Result};

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "GF_CONFIG";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# gf - group filter configuration

# Config schema version (do not modify)
version = 1

# Set to false to ignore every group expression
# groups_enabled = true

# Column names used when rendering predicates as SQL
[columns]
# group = "group_id"          # owning group (NULL or 0 when groupless)
# private = "event_private"   # 0 public, 1 private
"#;

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/gf/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("gf"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("gf"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk, using defaults when no file exists.
pub fn load_config() -> Result<FilterConfig> {
    let path = get_config_path()?;
    let config = FilterConfig::load(&path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        println!("Settings:");
        println!("  version: {}", config.version);
        println!("  groups_enabled: {}", config.groups_enabled);

        println!("\n[columns]");
        println!("  group: {}", config.columns.group);
        println!("  private: {}", config.columns.private);

        if !path.exists() {
            println!("\n(No config file exists. Run 'gf config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = write_default_config(force)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "created": true,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if ctx.use_colors {
            println!("{} {}", "Created".green(), path.display());
        } else {
            println!("Created {}", path.display());
        }
    }

    Ok(())
}

/// Writes the default config file, refusing to overwrite unless `force` is set.
fn write_default_config(force: bool) -> Result<PathBuf> {
    let path = get_config_path()?;

    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    fs::write(&path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Runs `f` with `GF_CONFIG` and `XDG_CONFIG_HOME` set, restoring them after.
    fn with_env<T>(config: Option<&str>, xdg: Option<&str>, f: impl FnOnce() -> T) -> T {
        let original_config = env::var(CONFIG_ENV).ok();
        let original_xdg = env::var("XDG_CONFIG_HOME").ok();

        set_or_remove(CONFIG_ENV, config);
        set_or_remove("XDG_CONFIG_HOME", xdg);

        let result = f();

        set_or_remove(CONFIG_ENV, original_config.as_deref());
        set_or_remove("XDG_CONFIG_HOME", original_xdg.as_deref());

        result
    }

    fn set_or_remove(key: &str, value: Option<&str>) {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = FilterConfig::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        let path = with_env(Some("/tmp/gf-test/custom.toml"), None, get_config_path).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/gf-test/custom.toml"));
    }

    #[test]
    #[serial]
    fn test_config_path_from_xdg() {
        let path = with_env(None, Some("/tmp/gf-xdg"), get_config_path).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/gf-xdg/gf/config.toml"));
    }

    #[test]
    #[serial]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("missing.toml");

        let config = with_env(config_path.to_str(), None, load_config).unwrap();
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_invalid_column_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[columns]\ngroup = \"group id\"\n").unwrap();

        let result = with_env(config_path.to_str(), None, load_config);
        assert!(matches!(result, Err(CommandError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_init_writes_default_and_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        with_env(config_path.to_str(), None, || {
            let written = write_default_config(false).unwrap();
            assert_eq!(written, config_path);
            assert_eq!(fs::read_to_string(&config_path).unwrap(), DEFAULT_CONFIG);

            let again = write_default_config(false);
            assert!(matches!(again, Err(CommandError::Config(_))));

            fs::write(&config_path, "groups_enabled = false\n").unwrap();
            assert!(write_default_config(true).is_ok());
            assert_eq!(load_config().unwrap(), FilterConfig::default());
        });
    }
}
