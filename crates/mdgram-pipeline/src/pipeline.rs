//! Pipeline orchestration: tokenize, extract, render, assemble.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use mdgram_config::{DEFAULT_DOCUMENT_TITLE, OptionsOverrides, ParserOptions};
use mdgram_diagrams::{
    DiagramExtractor, DiagramMarkup, DiagramRecord, DiagramSet, IdSalt, MermaidProcessor,
};
use mdgram_renderer::{HtmlBackend, MarkdownRenderer, Token};
use serde::Serialize;

use crate::document::assemble;

/// Result of parsing one markdown document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Rendered HTML fragment.
    pub html: String,
    pub has_diagrams: bool,
    pub diagram_count: usize,
    /// Extracted diagrams in document order.
    pub diagrams: Vec<DiagramRecord>,
    /// Warnings reported while rendering.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub metadata: ParseMetadata,
}

/// Run statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseMetadata {
    /// Number of top-level block tokens.
    pub token_count: usize,
    /// Wall-clock time spent tokenizing, extracting and rendering.
    pub elapsed_ms: f64,
}

/// Inspection summary of a document, produced without rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Number of top-level block tokens.
    pub token_count: usize,
    /// Code blocks per lower-cased language tag; untagged blocks are not counted.
    pub code_blocks: BTreeMap<String, usize>,
    pub has_diagrams: bool,
    pub diagram_count: usize,
}

/// Markdown to HTML pipeline with Mermaid diagram support.
///
/// Each [`parse`](Self::parse) call tokenizes the document, extracts diagram
/// records, and renders the document with a fresh renderer that swaps the
/// extracted blocks for diagram containers. All per-document state lives in
/// that call, so one pipeline can be shared across threads.
///
/// # Example
///
/// ```
/// use mdgram_config::ParserOptions;
/// use mdgram_pipeline::Pipeline;
///
/// let pipeline = Pipeline::new(ParserOptions::default());
/// let result = pipeline.parse("```mermaid\nflowchart TD\n  A --> B\n```");
/// assert_eq!(result.diagram_count, 1);
/// assert!(result.html.contains(r#"data-diagram-type="flowchart""#));
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: ParserOptions,
    salt: IdSalt,
    extractor: DiagramExtractor,
    markup: Arc<DiagramMarkup>,
    title: String,
}

impl Pipeline {
    /// Create a pipeline with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        let salt = IdSalt::default();
        Self {
            extractor: DiagramExtractor::new().with_salt(salt),
            markup: Arc::new(Self::create_markup(&options)),
            options,
            salt,
            title: DEFAULT_DOCUMENT_TITLE.to_owned(),
        }
    }

    /// Create a pipeline from default options with `overrides` applied.
    #[must_use]
    pub fn with_overrides(overrides: &OptionsOverrides) -> Self {
        Self::new(ParserOptions::default().with_overrides(overrides))
    }

    /// Set the `<title>` of assembled documents.
    #[must_use]
    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the source of the uniqueness token in diagram ids.
    #[must_use]
    pub fn with_id_salt(mut self, salt: IdSalt) -> Self {
        self.salt = salt;
        self.extractor = DiagramExtractor::new().with_salt(salt);
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    #[must_use]
    pub fn document_title(&self) -> &str {
        &self.title
    }

    /// Merge `overrides` into the current options.
    ///
    /// Extractor and markup generator are rebuilt; the next call observes the
    /// new options.
    pub fn set_options(&mut self, overrides: &OptionsOverrides) {
        self.options.apply(overrides);
        self.extractor = DiagramExtractor::new().with_salt(self.salt);
        self.markup = Arc::new(Self::create_markup(&self.options));
        tracing::debug!(theme = %self.options.diagram_theme, "Pipeline options updated");
    }

    /// Block tokens of `markdown`, as seen by the render pass.
    #[must_use]
    pub fn tokenize(&self, markdown: &str) -> Vec<Token> {
        self.create_renderer().tokenize(markdown)
    }

    /// Render `markdown` to an HTML fragment.
    #[must_use]
    pub fn parse(&self, markdown: &str) -> ParseResult {
        let start = Instant::now();

        let renderer = self.create_renderer();
        let tokens = renderer.tokenize(markdown);
        let diagrams = Arc::new(self.extractor.extract(&tokens));

        let mut renderer = renderer.with_processor(MermaidProcessor::new(
            Arc::clone(&diagrams),
            Arc::clone(&self.markup),
        ));
        let rendered = renderer.render_markdown(markdown);
        drop(renderer);

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let diagrams = Arc::try_unwrap(diagrams).map_or_else(
            |shared| shared.records().to_vec(),
            DiagramSet::into_records,
        );
        let token_count = count_top_level(&tokens);

        tracing::debug!(
            token_count,
            diagrams = diagrams.len(),
            elapsed_ms,
            "Parsed markdown"
        );

        ParseResult {
            html: rendered.html,
            has_diagrams: !diagrams.is_empty(),
            diagram_count: diagrams.len(),
            diagrams,
            warnings: rendered.warnings,
            metadata: ParseMetadata {
                token_count,
                elapsed_ms,
            },
        }
    }

    /// Render `markdown` to a complete HTML document.
    #[must_use]
    pub fn parse_to_document(&self, markdown: &str) -> String {
        self.document(&self.parse(markdown))
    }

    /// Wrap an earlier parse result into a complete HTML document.
    #[must_use]
    pub fn document(&self, result: &ParseResult) -> String {
        assemble(
            &result.html,
            &self.markup.init_script(result.diagram_count),
            &self.title,
        )
    }

    /// Mermaid init script for `diagram_count` diagrams, empty for zero.
    #[must_use]
    pub fn init_script(&self, diagram_count: usize) -> String {
        self.markup.init_script(diagram_count)
    }

    /// Summarize `markdown` without rendering it.
    #[must_use]
    pub fn analyze(&self, markdown: &str) -> Analysis {
        let tokens = self.tokenize(markdown);

        let mut code_blocks = BTreeMap::new();
        for language in tokens
            .iter()
            .filter_map(Token::code)
            .filter_map(|code| code.language.as_deref())
        {
            *code_blocks.entry(language.to_lowercase()).or_insert(0) += 1;
        }

        let diagrams = self.extractor.extract(&tokens);

        Analysis {
            token_count: count_top_level(&tokens),
            code_blocks,
            has_diagrams: !diagrams.is_empty(),
            diagram_count: diagrams.len(),
        }
    }

    fn create_renderer(&self) -> MarkdownRenderer<HtmlBackend> {
        MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(self.options.github_flavored_extensions)
            .with_hard_breaks(self.options.line_breaks_as_hard_breaks)
            .with_heading_ids(self.options.emit_header_ids)
    }

    fn create_markup(options: &ParserOptions) -> DiagramMarkup {
        DiagramMarkup::new(
            options.diagram_theme.as_str(),
            options.diagram_init_config.clone(),
        )
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

fn count_top_level(tokens: &[Token]) -> usize {
    tokens.iter().filter(|token| token.is_top_level()).count()
}

/// Parse `markdown` with a one-shot pipeline built from default options and `overrides`.
#[must_use]
pub fn parse_markdown(markdown: &str, overrides: &OptionsOverrides) -> ParseResult {
    Pipeline::with_overrides(overrides).parse(markdown)
}

/// Render `markdown` to a complete document with a one-shot pipeline.
#[must_use]
pub fn markdown_to_html(markdown: &str, overrides: &OptionsOverrides) -> String {
    Pipeline::with_overrides(overrides).parse_to_document(markdown)
}
