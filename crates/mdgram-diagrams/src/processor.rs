//! Code block processor that re-inserts extracted diagrams.
//!
//! [`MermaidProcessor`] implements [`CodeBlockProcessor`] for the render pass.
//! It does not validate anything itself: it receives the [`DiagramSet`] built
//! from the same document and, for each diagram-tagged block, looks up the
//! record by the block's ordinal.

use std::sync::Arc;

use mdgram_renderer::{CodeBlockProcessor, ProcessResult};

use crate::extractor::DiagramSet;
use crate::language::is_diagram_alias;
use crate::markup::DiagramMarkup;

/// Code block processor for Mermaid diagrams.
///
/// Blocks tagged `mermaid`/`mmd` that have a record are replaced by the
/// diagram container. Blocks the extractor rejected have no record and fall
/// through to regular code rendering.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use mdgram_diagrams::{DiagramExtractor, DiagramMarkup, MermaidProcessor};
/// use mdgram_renderer::{HtmlBackend, MarkdownRenderer};
///
/// let markdown = "```mermaid\ngraph TD\n  A --> B\n```";
/// let renderer = MarkdownRenderer::<HtmlBackend>::new();
/// let diagrams = Arc::new(DiagramExtractor::new().extract(&renderer.tokenize(markdown)));
///
/// let mut renderer = renderer.with_processor(MermaidProcessor::new(
///     diagrams,
///     Arc::new(DiagramMarkup::default()),
/// ));
/// let result = renderer.render_markdown(markdown);
/// assert!(result.html.contains(r#"class="mermaid-container""#));
/// ```
pub struct MermaidProcessor {
    diagrams: Arc<DiagramSet>,
    markup: Arc<DiagramMarkup>,
    /// Diagram-tagged blocks seen during the current render.
    seen: usize,
    /// Records emitted during the current render.
    attached: usize,
    warnings: Vec<String>,
}

impl MermaidProcessor {
    #[must_use]
    pub fn new(diagrams: Arc<DiagramSet>, markup: Arc<DiagramMarkup>) -> Self {
        Self {
            diagrams,
            markup,
            seen: 0,
            attached: 0,
            warnings: Vec::new(),
        }
    }

    /// Number of diagram-tagged blocks encountered so far.
    #[must_use]
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Number of records emitted as containers so far.
    #[must_use]
    pub fn attached(&self) -> usize {
        self.attached
    }
}

impl CodeBlockProcessor for MermaidProcessor {
    fn process(&mut self, language: &str, _source: &str, index: usize) -> ProcessResult {
        if !is_diagram_alias(language) {
            return ProcessResult::PassThrough;
        }
        self.seen += 1;

        match self.diagrams.by_block(index) {
            Some(record) => {
                self.attached += 1;
                ProcessResult::Inline(self.markup.container(record))
            }
            None => {
                tracing::debug!(
                    block_index = index,
                    "No diagram record for block, rendering as code"
                );
                ProcessResult::PassThrough
            }
        }
    }

    fn reset(&mut self) {
        self.seen = 0;
        self.attached = 0;
        self.warnings.clear();
    }

    fn post_process(&mut self, _html: &mut String) {
        let missing = self.diagrams.len().saturating_sub(self.attached);
        if missing > 0 {
            tracing::warn!(
                missing,
                total = self.diagrams.len(),
                "Extracted diagrams were not placed in the output"
            );
            self.warnings.push(format!(
                "{missing} of {} extracted diagrams were not placed in the output",
                self.diagrams.len()
            ));
        }
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use mdgram_renderer::{HtmlBackend, MarkdownRenderer, RenderResult};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::extractor::{DiagramExtractor, IdSalt};

    fn render(markdown: &str) -> RenderResult {
        let renderer = MarkdownRenderer::<HtmlBackend>::new();
        let diagrams = DiagramExtractor::new()
            .with_salt(IdSalt::Fixed(1))
            .extract(&renderer.tokenize(markdown));
        renderer
            .with_processor(MermaidProcessor::new(
                Arc::new(diagrams),
                Arc::new(DiagramMarkup::default()),
            ))
            .render_markdown(markdown)
    }

    /// Contents of every diagram `<pre>` in document order.
    fn container_bodies(html: &str) -> Vec<&str> {
        html.split(r#"<pre class="mermaid" id=""#)
            .skip(1)
            .filter_map(|rest| {
                let body = rest.split_once("\">")?.1;
                Some(body.split_once("</pre>")?.0)
            })
            .collect()
    }

    #[test]
    fn test_process_ignores_other_languages() {
        let mut processor =
            MermaidProcessor::new(Arc::default(), Arc::new(DiagramMarkup::default()));
        assert_eq!(processor.process("rust", "fn main() {}", 0), ProcessResult::PassThrough);
        assert_eq!(processor.seen(), 0);
    }

    #[test]
    fn test_single_diagram_replaced() {
        let result = render("```mermaid\nflowchart TD\n A-->B\n```");
        assert_eq!(
            result.html,
            "<div class=\"mermaid-container\" data-diagram-type=\"flowchart\"><pre class=\"mermaid\" id=\"mermaid-diagram-0-1\">flowchart TD\n A--&gt;B</pre></div>"
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_diagram_rendered_as_code() {
        let result = render("```mermaid\nnot a real diagram\n```");
        assert_eq!(
            result.html,
            "<pre><code class=\"language-mermaid\">not a real diagram\n</code></pre>"
        );
    }

    #[test]
    fn test_interleaved_valid_and_invalid_blocks_keep_order() {
        let markdown = "\
```mermaid
bogus one
```

```mermaid
graph TD
  first
```

```mmd
still not valid
```

Text between.

```Mermaid
pie
  second
```

```mermaid
sequenceDiagram
  third
```
";
        let result = render(markdown);
        let bodies = container_bodies(&result.html);
        assert_eq!(
            bodies,
            vec![
                "graph TD\n  first",
                "pie\n  second",
                "sequenceDiagram\n  third",
            ]
        );
        assert!(result.html.contains("language-mermaid\">bogus one"));
        assert!(result.html.contains("language-mmd\">still not valid"));
        assert!(result.html.contains(r#"id="mermaid-diagram-2-1""#));
    }

    #[test]
    fn test_unplaced_records_warn() {
        let markdown = "```mermaid\ngraph TD\n```";
        let tokens = MarkdownRenderer::<HtmlBackend>::new().tokenize(markdown);
        let diagrams = DiagramExtractor::new().extract(&tokens);

        // Render a different document with the stale set.
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new().with_processor(
            MermaidProcessor::new(Arc::new(diagrams), Arc::new(DiagramMarkup::default())),
        );
        let result = renderer.render_markdown("Just text.");
        assert_eq!(
            result.warnings,
            vec!["1 of 1 extracted diagrams were not placed in the output".to_owned()]
        );
    }

    #[test]
    fn test_reset_clears_counters() {
        let markdown = "```mermaid\ngraph TD\n```\n\n```mermaid\nnope\n```";
        let tokens = MarkdownRenderer::<HtmlBackend>::new().tokenize(markdown);
        let diagrams = Arc::new(DiagramExtractor::new().extract(&tokens));
        let mut processor = MermaidProcessor::new(diagrams, Arc::new(DiagramMarkup::default()));

        assert!(matches!(
            processor.process("mermaid", "graph TD\n", 0),
            ProcessResult::Inline(_)
        ));
        assert_eq!(processor.process("mermaid", "nope\n", 1), ProcessResult::PassThrough);
        assert_eq!((processor.seen(), processor.attached()), (2, 1));

        processor.reset();
        assert_eq!((processor.seen(), processor.attached()), (0, 0));
    }

    #[test]
    fn test_renderer_reuse_does_not_leak_cursor() {
        let markdown = "```mermaid\ngraph TD\n```\n\n```mermaid\npie\n```";
        let renderer = MarkdownRenderer::<HtmlBackend>::new();
        let diagrams = Arc::new(DiagramExtractor::new().extract(&renderer.tokenize(markdown)));
        let mut renderer = renderer.with_processor(MermaidProcessor::new(
            diagrams,
            Arc::new(DiagramMarkup::default()),
        ));

        let first = renderer.render_markdown(markdown);
        let second = renderer.render_markdown(markdown);
        assert_eq!(first.html, second.html);
        assert_eq!(container_bodies(&second.html).len(), 2);
        assert!(second.warnings.is_empty());
    }
}
