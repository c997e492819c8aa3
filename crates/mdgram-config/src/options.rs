//! Parser options and per-field overrides.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Mermaid theme name.
///
/// The four built-in Mermaid themes are named variants; any other value is
/// kept verbatim and handed to Mermaid unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum DiagramTheme {
    #[default]
    Default,
    Dark,
    Forest,
    Neutral,
    Custom(String),
}

impl DiagramTheme {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Forest => "forest",
            Self::Neutral => "neutral",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for DiagramTheme {
    fn from(name: &str) -> Self {
        match name {
            "default" => Self::Default,
            "dark" => Self::Dark,
            "forest" => Self::Forest,
            "neutral" => Self::Neutral,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl From<String> for DiagramTheme {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl fmt::Display for DiagramTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options controlling markdown parsing and diagram markup.
///
/// `ParserOptions::default()` is the baseline every pipeline starts from;
/// callers layer [`OptionsOverrides`] on top of it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Theme passed to `mermaid.initialize`.
    pub diagram_theme: DiagramTheme,
    /// Advisory flag, carried for callers; output is not sanitized.
    pub sanitize: bool,
    /// Render single newlines inside paragraphs as `<br>`.
    pub line_breaks_as_hard_breaks: bool,
    /// Tables, strikethrough and task lists.
    pub github_flavored_extensions: bool,
    /// Add slug `id` attributes to headings.
    pub emit_header_ids: bool,
    /// Extra keys merged into the `mermaid.initialize` options.
    pub diagram_init_config: Map<String, Value>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            diagram_theme: DiagramTheme::Default,
            sanitize: true,
            line_breaks_as_hard_breaks: true,
            github_flavored_extensions: true,
            emit_header_ids: true,
            diagram_init_config: Map::new(),
        }
    }
}

impl ParserOptions {
    /// Return a copy with `overrides` applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: &OptionsOverrides) -> Self {
        let mut options = self.clone();
        options.apply(overrides);
        options
    }

    /// Replace every field that `overrides` sets.
    pub fn apply(&mut self, overrides: &OptionsOverrides) {
        if let Some(theme) = &overrides.diagram_theme {
            self.diagram_theme.clone_from(theme);
        }
        if let Some(sanitize) = overrides.sanitize {
            self.sanitize = sanitize;
        }
        if let Some(hard_breaks) = overrides.line_breaks_as_hard_breaks {
            self.line_breaks_as_hard_breaks = hard_breaks;
        }
        if let Some(gfm) = overrides.github_flavored_extensions {
            self.github_flavored_extensions = gfm;
        }
        if let Some(header_ids) = overrides.emit_header_ids {
            self.emit_header_ids = header_ids;
        }
        if let Some(init_config) = &overrides.diagram_init_config {
            self.diagram_init_config.clone_from(init_config);
        }
    }
}

/// Partial [`ParserOptions`]: only `Some` fields replace the base value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptionsOverrides {
    pub diagram_theme: Option<DiagramTheme>,
    pub sanitize: Option<bool>,
    pub line_breaks_as_hard_breaks: Option<bool>,
    pub github_flavored_extensions: Option<bool>,
    pub emit_header_ids: Option<bool>,
    pub diagram_init_config: Option<Map<String, Value>>,
}

impl OptionsOverrides {
    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
