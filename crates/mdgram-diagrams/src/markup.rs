//! HTML markup for extracted diagrams.
//!
//! Diagrams are not drawn here. Each one becomes a container holding its
//! escaped source, and a single module script initializes Mermaid in the
//! browser, which then renders every container client-side.

use std::fmt::Write;

use serde_json::{Map, Value};

use crate::consts::{CONTAINER_CLASS, MERMAID_MODULE_URL};
use crate::extractor::DiagramRecord;

/// Escape `&`, `<` and `>` in diagram source.
///
/// Quotes are left alone: Mermaid reads the element text, and arrow and label
/// syntax depends on them.
#[must_use]
pub fn escape_diagram_source(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    for c in source.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Generates diagram containers and the Mermaid init script.
#[derive(Debug, Clone)]
pub struct DiagramMarkup {
    theme: String,
    init_config: Map<String, Value>,
}

impl DiagramMarkup {
    /// Create a generator for the given theme and extra `mermaid.initialize` options.
    ///
    /// Keys in `init_config` take precedence over `startOnLoad` and `theme`.
    #[must_use]
    pub fn new(theme: impl Into<String>, init_config: Map<String, Value>) -> Self {
        Self {
            theme: theme.into(),
            init_config,
        }
    }

    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Container element for one diagram.
    #[must_use]
    pub fn container(&self, record: &DiagramRecord) -> String {
        format!(
            r#"<div class="{CONTAINER_CLASS}" data-diagram-type="{}"><pre class="mermaid" id="{}">{}</pre></div>"#,
            record.diagram_type,
            record.id,
            escape_diagram_source(&record.code)
        )
    }

    /// Options object passed to `mermaid.initialize`.
    #[must_use]
    pub fn init_config(&self) -> Value {
        let mut config = Map::new();
        config.insert("startOnLoad".to_owned(), Value::Bool(true));
        config.insert("theme".to_owned(), Value::String(self.theme.clone()));
        for (key, value) in &self.init_config {
            config.insert(key.clone(), value.clone());
        }
        Value::Object(config)
    }

    /// Module script that loads Mermaid and renders all containers.
    ///
    /// Returns an empty string when `diagram_count` is zero.
    #[must_use]
    pub fn init_script(&self, diagram_count: usize) -> String {
        if diagram_count == 0 {
            return String::new();
        }

        let mut script = String::from("<script type=\"module\">\n");
        writeln!(script, "  import mermaid from '{MERMAID_MODULE_URL}';").unwrap();
        writeln!(script, "  mermaid.initialize({:#});", self.init_config()).unwrap();
        script.push_str("</script>");
        script
    }
}

impl Default for DiagramMarkup {
    fn default() -> Self {
        Self::new("default", Map::new())
    }
}
