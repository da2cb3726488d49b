use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Keys accepted by `dynaform config get` and `dynaform config set`.
pub const KEYS: &[&str] = &["schema_file", "export_path", "log_level", "log_coloured"];

/// Configuration for dynaform.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (DYNAFORM_* prefix)
/// 3. Config file (~/.config/dynaform/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// TOML schema document to load form types from.
    ///
    /// Can be set via:
    /// - CLI: --schemas /path/to/schemas.toml
    /// - ENV: DYNAFORM_SCHEMA_FILE
    /// - Config: schema_file = "/path/to/schemas.toml"
    /// - Default: unset, meaning the bundled form types
    #[serde(default)]
    pub schema_file: Option<PathBuf>,

    /// Where the TUI writes submissions (as JSON) on exit.
    #[serde(default)]
    pub export_path: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, or error.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether log output is coloured.
    ///
    /// Environment values arrive as text, so "true" and "false" are
    /// accepted as well as TOML booleans.
    #[serde(
        default = "default_log_coloured",
        deserialize_with = "deserialize_flag"
    )]
    pub log_coloured: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_file: None,
            export_path: None,
            log_level: default_log_level(),
            log_coloured: default_log_coloured(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration using the given file instead of the default location.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("dynaform");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        Ok(config)
    }

    /// Apply the --schemas CLI flag, which wins over every other source.
    #[must_use]
    pub fn with_schema_file(mut self, schema_file: Option<PathBuf>) -> Self {
        if schema_file.is_some() {
            self.schema_file = schema_file;
        }
        self
    }

    /// The current value of `key` as text, or `None` for an unknown key.
    pub fn get(&self, key: &str) -> Option<String> {
        let path_or_unset = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<not set>".to_string())
        };
        match key {
            "schema_file" => Some(path_or_unset(&self.schema_file)),
            "export_path" => Some(path_or_unset(&self.export_path)),
            "log_level" => Some(self.log_level.clone()),
            "log_coloured" => Some(self.log_coloured.to_string()),
            _ => None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_log_coloured() -> bool {
    true
}

/// Parse "true" or "false", ignoring case and surrounding whitespace.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(flag) => Ok(flag),
        Flag::Text(text) => parse_flag(&text).ok_or_else(|| {
            serde::de::Error::custom(format!("expected true or false, got '{}'", text))
        }),
    }
}

/// Directory holding dynaform's config and schema files.
///
/// Returns:
/// - Linux: ~/.config/dynaform
/// - macOS: ~/Library/Application Support/dynaform
/// - Windows: %APPDATA%\dynaform
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dynaform")
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default location of the schema document written by `schemas init`.
pub fn default_schema_path() -> PathBuf {
    config_dir().join("schemas.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Dynaform Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (DYNAFORM_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# TOML schema document defining the available form types.
# Leave unset to use the bundled User, Address, and Payment forms.
#
# Can also be set via:
# - CLI: dynaform --schemas /path/to/schemas.toml list
# - Environment: DYNAFORM_SCHEMA_FILE=/path/to/schemas.toml
#schema_file = "/path/to/schemas.toml"

# Where `dynaform tui` writes submissions as JSON when it exits.
#export_path = "/path/to/submissions.json"

# Log level: trace, debug, info, warn, or error
log_level = "warn"

# Colour log output
log_coloured = true
"#
}

/// Create the config file with defaults at `path` if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file_at(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(path, example_config()).context("Failed to write config file")?;
    Ok(true)
}

pub fn ensure_config_file() -> Result<bool> {
    ensure_config_file_at(&config_file_path())
}

/// Set `key` to `value` in the config file at `path`, keeping its comments.
pub fn set_value_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
    let mut doc = contents
        .parse::<toml_edit::DocumentMut>()
        .context("Config file is not valid TOML")?;

    match key {
        "schema_file" | "export_path" | "log_level" => {
            doc[key] = toml_edit::value(value);
        }
        "log_coloured" => {
            let flag = parse_flag(value).with_context(|| {
                format!("log_coloured must be true or false, got '{}'", value)
            })?;
            doc[key] = toml_edit::value(flag);
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\nValid keys: {}",
                key,
                KEYS.join(", ")
            );
        }
    }

    std::fs::write(path, doc.to_string()).context("Failed to write config file")?;
    Ok(())
}
