//! Markdown to HTML pipeline with client-side Mermaid diagrams.
//!
//! A [`Pipeline`] runs two passes over the same text:
//!
//! 1. tokenize and extract diagram records from `mermaid`/`mmd` code blocks
//! 2. render the document, replacing each accepted block with a diagram
//!    container
//!
//! The fragment can then be wrapped into a standalone page with
//! [`assemble`], which also appends the Mermaid init script when the
//! document has diagrams.
//!
//! # Example
//!
//! ```
//! use mdgram_config::OptionsOverrides;
//! use mdgram_pipeline::markdown_to_html;
//!
//! let html = markdown_to_html("# Hello\n\n```mmd\npie\n  \"A\" : 1\n```", &OptionsOverrides::default());
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! assert!(html.contains("mermaid.initialize"));
//! ```

mod document;
mod pipeline;

pub use document::assemble;
pub use pipeline::{
    Analysis, ParseMetadata, ParseResult, Pipeline, markdown_to_html, parse_markdown,
};
