//! Internal constants for diagram markup.

/// ES module build of Mermaid loaded by the init script.
pub const MERMAID_MODULE_URL: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs";

/// Prefix of generated diagram element ids.
pub const DIAGRAM_ID_PREFIX: &str = "mermaid-diagram";

/// Class of the element wrapping each diagram.
pub const CONTAINER_CLASS: &str = "mermaid-container";
