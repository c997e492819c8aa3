//! Diagram fence aliases and diagram kind keywords.

use std::fmt;

use serde::Serialize;

/// Fence tags that mark a code block as a Mermaid diagram.
pub const DIAGRAM_ALIASES: [&str; 2] = ["mermaid", "mmd"];

/// Check whether a fence language tag names a diagram block.
///
/// The tag is trimmed and compared case-insensitively.
#[must_use]
pub fn is_diagram_alias(tag: &str) -> bool {
    let tag = tag.trim();
    DIAGRAM_ALIASES
        .iter()
        .any(|alias| alias.eq_ignore_ascii_case(tag))
}

/// Diagram kind, detected from the leading keyword of the diagram source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramType {
    Graph,
    Flowchart,
    SequenceDiagram,
    ClassDiagram,
    StateDiagram,
    ErDiagram,
    Gantt,
    Pie,
    Journey,
    GitGraph,
    Mindmap,
    Timeline,
    /// Source accepted but not attributable to a known kind.
    Unknown,
}

impl DiagramType {
    /// Known kinds in match order.
    pub const KNOWN: [Self; 12] = [
        Self::Graph,
        Self::Flowchart,
        Self::SequenceDiagram,
        Self::ClassDiagram,
        Self::StateDiagram,
        Self::ErDiagram,
        Self::Gantt,
        Self::Pie,
        Self::Journey,
        Self::GitGraph,
        Self::Mindmap,
        Self::Timeline,
    ];

    /// Keyword as written in Mermaid sources (`sequenceDiagram`, `gitGraph`).
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Flowchart => "flowchart",
            Self::SequenceDiagram => "sequenceDiagram",
            Self::ClassDiagram => "classDiagram",
            Self::StateDiagram => "stateDiagram",
            Self::ErDiagram => "erDiagram",
            Self::Gantt => "gantt",
            Self::Pie => "pie",
            Self::Journey => "journey",
            Self::GitGraph => "gitGraph",
            Self::Mindmap => "mindmap",
            Self::Timeline => "timeline",
            Self::Unknown => "unknown",
        }
    }

    /// Lower-cased label used in markup and serialized output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Flowchart => "flowchart",
            Self::SequenceDiagram => "sequencediagram",
            Self::ClassDiagram => "classdiagram",
            Self::StateDiagram => "statediagram",
            Self::ErDiagram => "erdiagram",
            Self::Gantt => "gantt",
            Self::Pie => "pie",
            Self::Journey => "journey",
            Self::GitGraph => "gitgraph",
            Self::Mindmap => "mindmap",
            Self::Timeline => "timeline",
            Self::Unknown => "unknown",
        }
    }

    /// Detect the kind from the leading keyword of `source`.
    ///
    /// Leading whitespace is skipped and the comparison is case-insensitive.
    /// Returns `None` for empty sources and sources that do not start with a
    /// known keyword.
    #[must_use]
    pub fn detect(source: &str) -> Option<Self> {
        let first_line = source.trim().lines().next()?.to_lowercase();
        Self::KNOWN
            .into_iter()
            .find(|kind| first_line.starts_with(kind.as_str()))
    }

    /// Classify an accepted diagram source, falling back to [`Unknown`](Self::Unknown).
    #[must_use]
    pub fn classify(source: &str) -> Self {
        Self::detect(source).unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basic validity check for diagram source: non-blank and starting with a
/// known keyword.
#[must_use]
pub fn is_valid_diagram(source: &str) -> bool {
    DiagramType::detect(source).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagram_aliases() {
        assert!(is_diagram_alias("mermaid"));
        assert!(is_diagram_alias("mmd"));
        assert!(is_diagram_alias("  Mermaid "));
        assert!(is_diagram_alias("MMD"));
        assert!(!is_diagram_alias("mermaidjs"));
        assert!(!is_diagram_alias("plantuml"));
        assert!(!is_diagram_alias(""));
    }

    #[test]
    fn test_all_keywords_detected() {
        for kind in DiagramType::KNOWN {
            let source = format!("{}\n  body", kind.keyword());
            assert_eq!(
                DiagramType::detect(&source),
                Some(kind),
                "Failed to detect: {}",
                kind.keyword()
            );
        }
    }

    #[test]
    fn test_detect_case_insensitive_and_trimmed() {
        assert_eq!(
            DiagramType::detect("\n\n   SEQUENCEDIAGRAM\n  A->>B: hi"),
            Some(DiagramType::SequenceDiagram)
        );
        assert_eq!(
            DiagramType::detect("stateDiagram-v2\n  [*] --> S"),
            Some(DiagramType::StateDiagram)
        );
        assert_eq!(
            DiagramType::detect("graph LR\n  A --> B"),
            Some(DiagramType::Graph)
        );
    }

    #[test]
    fn test_detect_rejects() {
        assert_eq!(DiagramType::detect(""), None);
        assert_eq!(DiagramType::detect("   \n\t"), None);
        assert_eq!(DiagramType::detect("not a real diagram"), None);
        assert_eq!(DiagramType::detect("%% comment\ngraph TD"), None);
    }

    #[test]
    fn test_classify_falls_back_to_unknown() {
        assert_eq!(DiagramType::classify("flowchart TD"), DiagramType::Flowchart);
        assert_eq!(DiagramType::classify("nothing here"), DiagramType::Unknown);
    }

    #[test]
    fn test_labels_are_lowercase() {
        for kind in DiagramType::KNOWN {
            assert_eq!(kind.as_str(), kind.keyword().to_lowercase());
        }
        assert_eq!(DiagramType::Unknown.to_string(), "unknown");
        assert_eq!(DiagramType::ErDiagram.to_string(), "erdiagram");
    }

    #[test]
    fn test_serialize_as_label() {
        let json = serde_json::to_string(&DiagramType::SequenceDiagram).unwrap();
        assert_eq!(json, r#""sequencediagram""#);
        let json = serde_json::to_string(&DiagramType::GitGraph).unwrap();
        assert_eq!(json, r#""gitgraph""#);
    }

    #[test]
    fn test_is_valid_diagram() {
        assert!(is_valid_diagram("pie title Pets\n  \"Dogs\" : 3"));
        assert!(is_valid_diagram("  Gantt\n"));
        assert!(!is_valid_diagram("A --> B"));
        assert!(!is_valid_diagram(""));
    }
}
