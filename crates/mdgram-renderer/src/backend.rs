//! Output backend seam.

/// Spelling of the leaf elements whose markup depends on the output target.
///
/// [`MarkdownRenderer`](crate::MarkdownRenderer) owns document structure
/// (paragraphs, lists, headings, inline formatting). A backend writes the
/// elements below; the provided methods spell plain HTML.
pub trait RenderBackend {
    /// Class attribute for `<table>` elements, if any.
    const TABLE_CLASS: Option<&'static str> = None;

    /// Code block that no [`CodeBlockProcessor`](crate::CodeBlockProcessor) claimed.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Image. `title` is empty when the source had none.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Opening or closing blockquote tag.
    fn blockquote(open: bool, out: &mut String) {
        out.push_str(if open { "<blockquote>" } else { "</blockquote>" });
    }

    fn table_start(out: &mut String) {
        match Self::TABLE_CLASS {
            Some(class) => {
                out.push_str("<table class=\"");
                out.push_str(class);
                out.push_str("\">");
            }
            None => out.push_str("<table>"),
        }
    }

    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Disabled checkbox for a task list item.
    fn task_list_marker(checked: bool, out: &mut String) {
        out.push_str("<input type=\"checkbox\"");
        if checked {
            out.push_str(" checked");
        }
        out.push_str(" disabled> ");
    }
}
