//! Configuration management for mdgram.
//!
//! Parses `mdgram.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [parser]
//! diagram_theme = "dark"
//! line_breaks_as_hard_breaks = false
//!
//! [parser.diagram_init_config]
//! securityLevel = "loose"
//!
//! [document]
//! title = "Architecture Notes"
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].

mod options;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use options::{DiagramTheme, OptionsOverrides, ParserOptions};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "mdgram.toml";

/// `<title>` of assembled documents unless configured otherwise.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Markdown Document";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Parser option overrides.
    pub parser: OptionsOverrides,
    /// Override document title.
    pub title: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parser options (`[parser]`).
    pub parser: ParserOptions,
    /// Document shell options (`[document]`).
    pub document: DocumentConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Document shell configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Content of the `<title>` element.
    pub title: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_DOCUMENT_TITLE.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdgram.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        self.parser.apply(&settings.parser);
        if let Some(title) = &settings.title {
            self.document.title.clone_from(title);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Option values themselves are not checked (unknown themes are passed
    /// through to Mermaid); only structurally unusable values are rejected.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_parser()?;
        require_non_empty(&self.document.title, "document.title")?;
        Ok(())
    }

    fn validate_parser(&self) -> Result<(), ConfigError> {
        if self
            .parser
            .diagram_init_config
            .keys()
            .any(|key| key.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "parser.diagram_init_config keys cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
