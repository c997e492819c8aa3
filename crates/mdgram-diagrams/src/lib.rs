//! Mermaid diagram support for mdgram.
//!
//! Diagrams are handled in two passes over the same document:
//! - [`DiagramExtractor`] scans block tokens and produces a [`DiagramSet`]
//!   of validated, classified [`DiagramRecord`]s
//! - [`MermaidProcessor`] plugs into the renderer as a `CodeBlockProcessor`
//!   and swaps each accepted block for its container
//!
//! [`DiagramMarkup`] produces the container elements and the module script
//! that initializes Mermaid in the browser.
//!
//! # Modules
//!
//! - [`language`]: fence aliases and [`DiagramType`] keywords
//! - `extractor`: record extraction and id generation
//! - `markup`: containers and init script
//! - `processor`: render-side code block processor

mod consts;
mod extractor;
pub mod language;
mod markup;
mod processor;

pub use consts::MERMAID_MODULE_URL;
pub use extractor::{DiagramExtractor, DiagramRecord, DiagramSet, IdSalt};
pub use language::{DiagramType, is_diagram_alias, is_valid_diagram};
pub use markup::{DiagramMarkup, escape_diagram_source};
pub use processor::MermaidProcessor;
