//! Event-driven markdown renderer with pluggable backends.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces HTML
//! through the [`RenderBackend`] trait, and a block-level [`tokenize`]r that
//! walks the same `pulldown-cmark` event stream the renderer consumes.
//!
//! # Architecture
//!
//! - [`HtmlBackend`]: semantic HTML5 output (`<pre><code>`, styled tables)
//! - [`CodeBlockProcessor`]: hook for replacing selected code blocks with
//!   custom markup (diagrams, embeds) before the backend sees them
//! - [`tokenize`]: ordered block tokens with source spans, used for
//!   inspection passes that must agree with the render pass on block
//!   boundaries
//!
//! Both the tokenizer and the renderer number code blocks in document order
//! (fenced and indented, at any nesting depth). That number is passed to
//! processors as `index` and stored on [`CodeToken::index`], so a pass over
//! tokens can address the exact block the renderer is about to emit.
//!
//! # Example
//!
//! ```
//! use mdgram_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
//! let result = renderer.render_markdown("# Hello\n\n**Bold** text");
//! assert!(result.html.contains("<strong>Bold</strong>"));
//! ```

mod backend;
mod code_block;
mod html;
mod renderer;
mod state;
mod token;
mod util;

pub use backend::RenderBackend;
pub use code_block::{CodeBlockProcessor, ProcessResult};
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{escape_html, slugify};
pub use token::{CodeToken, Token, TokenKind, tokenize};
