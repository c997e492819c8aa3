//! Code block processor trait for extensible code block handling.
//!
//! Processors are registered with the renderer and checked in order when a
//! code block is complete. The first processor returning a non-`PassThrough`
//! result wins; if none claims the block, the backend renders it as code.
//!
//! # Example
//!
//! ```
//! use mdgram_renderer::{CodeBlockProcessor, ProcessResult};
//!
//! struct ShoutProcessor;
//!
//! impl CodeBlockProcessor for ShoutProcessor {
//!     fn process(&mut self, language: &str, source: &str, _index: usize) -> ProcessResult {
//!         if language == "shout" {
//!             ProcessResult::Inline(format!("<strong>{}</strong>", source.trim().to_uppercase()))
//!         } else {
//!             ProcessResult::PassThrough
//!         }
//!     }
//! }
//! ```

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the code block with HTML.
    Inline(String),

    /// Render as a regular code block.
    PassThrough,
}

/// Trait for processing special code blocks.
///
/// A processor instance belongs to one renderer. The renderer calls
/// [`reset`](Self::reset) at the start of every render, so any cursor or
/// counter a processor keeps only ever describes the current document.
pub trait CodeBlockProcessor {
    /// Process a code block and return the result.
    ///
    /// # Arguments
    ///
    /// * `language` - First word of the fence info string
    /// * `source` - Raw content of the code block
    /// * `index` - Zero-based ordinal of this code block in the document,
    ///   counting every code block (fenced or indented) at any depth
    fn process(&mut self, language: &str, source: &str, index: usize) -> ProcessResult;

    /// Clear per-document state. Called before the first event of each render.
    fn reset(&mut self) {}

    /// Inspect or rewrite the rendered HTML once all events are consumed.
    fn post_process(&mut self, _html: &mut String) {}

    /// Warnings generated during the last render.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Extract the language tag from a fence info string.
///
/// Format: `language [anything ...]`. Only the first whitespace-separated
/// word is the language; the rest is ignored.
#[must_use]
pub(crate) fn fence_language(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}
