//! Per-element state tracked while consuming parser events.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Text captured between a start and an end event.
///
/// Used for code block bodies (tagged with the fence language) and image alt
/// text (tagged with source and title).
pub(crate) struct Capture<T> {
    tag: Option<T>,
    buffer: String,
}

impl<T> Default for Capture<T> {
    fn default() -> Self {
        Self {
            tag: None,
            buffer: String::new(),
        }
    }
}

impl<T> Capture<T> {
    pub(crate) fn start(&mut self, tag: T) {
        self.tag = Some(tag);
        self.buffer.clear();
    }

    /// Stop capturing and return the tag with the captured text.
    pub(crate) fn end(&mut self) -> Option<(T, String)> {
        let tag = self.tag.take()?;
        Some((tag, std::mem::take(&mut self.buffer)))
    }

    pub(crate) fn clear(&mut self) {
        self.tag = None;
        self.buffer.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.tag.is_some()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Alignment style attribute for the current cell.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for tracking heading text and anchor ids.
///
/// Heading content is buffered so the opening tag can carry an id derived
/// from the complete plain text.
pub(crate) struct HeadingState {
    emit_ids: bool,
    current_level: Option<u8>,
    /// Plain text of the current heading (slug source).
    text: String,
    /// HTML of the current heading (with inline formatting).
    html: String,
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn new(emit_ids: bool) -> Self {
        Self {
            emit_ids,
            current_level: None,
            text: String::new(),
            html: String::new(),
            id_counts: HashMap::new(),
        }
    }

    /// Forget ids handed out for a previous document.
    pub(crate) fn reset(&mut self) {
        self.current_level = None;
        self.text.clear();
        self.html.clear();
        self.id_counts.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Complete the current heading.
    ///
    /// Returns (level, id, html), or None if not in a heading. The id is
    /// `None` when id emission is disabled.
    pub(crate) fn complete_heading(&mut self) -> Option<(u8, Option<String>, String)> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let id = self.emit_ids.then(|| self.generate_id(&text));
        Some((level, id, html))
    }

    /// Generate a unique ID for a heading.
    fn generate_id(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn html_buffer(&mut self) -> &mut String {
        &mut self.html
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Escape HTML special characters, quotes included.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake-case");
        assert_eq!(slugify("Überblick"), "überblick");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_capture_code_block() {
        let mut capture = Capture::default();
        assert!(!capture.is_active());

        capture.start(Some("rust".to_owned()));
        assert!(capture.is_active());
        capture.push_str("fn main() {}");
        capture.push_str("\n");

        let (lang, content) = capture.end().unwrap();
        assert_eq!(lang.as_deref(), Some("rust"));
        assert_eq!(content, "fn main() {}\n");
        assert!(!capture.is_active());
        assert!(capture.end().is_none());
    }

    #[test]
    fn test_capture_clear_discards_text() {
        let mut capture = Capture::default();
        capture.start(("a.png".to_owned(), String::new()));
        capture.push_str("partial alt");
        capture.clear();

        capture.start(("b.png".to_owned(), String::new()));
        let ((src, _), alt) = capture.end().unwrap();
        assert_eq!(src, "b.png");
        assert_eq!(alt, "");
    }

    #[test]
    fn test_table_state_alignment() {
        let mut state = TableState::default();
        state.start(vec![Alignment::Left, Alignment::Center, Alignment::None]);

        state.start_head();
        assert!(state.is_in_head());
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:left""#
        );

        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:center""#
        );

        state.next_cell();
        assert_eq!(state.current_alignment_style(), "");

        state.end_head();
        assert!(!state.is_in_head());
    }

    #[test]
    fn test_heading_ids_deduplicated() {
        let mut state = HeadingState::new(true);
        for _ in 0..3 {
            state.start_heading(2);
            state.push_text("FAQ");
            state.push_html("FAQ");
            state.complete_heading();
        }
        state.start_heading(2);
        state.push_text("FAQ");
        let (level, id, html) = state.complete_heading().unwrap();
        assert_eq!(level, 2);
        assert_eq!(id.as_deref(), Some("faq-3"));
        assert_eq!(html, "");
    }

    #[test]
    fn test_heading_ids_disabled() {
        let mut state = HeadingState::new(false);
        state.start_heading(1);
        state.push_text("Title");
        let (_, id, _) = state.complete_heading().unwrap();
        assert!(id.is_none());
    }

    #[test]
    fn test_heading_reset_restarts_ids() {
        let mut state = HeadingState::new(true);
        state.start_heading(1);
        state.push_text("Intro");
        state.complete_heading();

        state.reset();
        state.start_heading(1);
        state.push_text("Intro");
        let (_, id, _) = state.complete_heading().unwrap();
        assert_eq!(id.as_deref(), Some("intro"));
    }

    #[test]
    fn test_complete_heading_outside_heading() {
        let mut state = HeadingState::new(true);
        assert!(state.complete_heading().is_none());
    }
}
