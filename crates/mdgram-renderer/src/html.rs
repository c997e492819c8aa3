//! HTML5 backend for standalone documents.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::state::escape_html;

/// HTML render backend. Tables carry the `markdown-table` class.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    const TABLE_CLASS: Option<&'static str> = Some("markdown-table");

    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        out.push_str("<pre><code");
        if let Some(lang) = lang {
            write!(out, r#" class="language-{}""#, escape_html(lang)).unwrap();
        }
        out.push('>');
        out.push_str(&escape_html(content));
        out.push_str("</code></pre>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        write!(out, r#"<img src="{}""#, escape_html(src)).unwrap();
        if !title.is_empty() {
            write!(out, r#" title="{}""#, escape_html(title)).unwrap();
        }
        write!(out, r#" alt="{}">"#, escape_html(alt)).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(write: impl FnOnce(&mut String)) -> String {
        let mut out = String::new();
        write(&mut out);
        out
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            spell(|out| HtmlBackend::code_block(Some("rust"), "fn main() {}", out)),
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
        assert_eq!(
            spell(|out| HtmlBackend::code_block(None, "a < b", out)),
            "<pre><code>a &lt; b</code></pre>"
        );
    }

    #[test]
    fn test_code_block_escapes_language_and_quotes() {
        assert_eq!(
            spell(|out| HtmlBackend::code_block(Some("x\"y"), "\"q\"", out)),
            r#"<pre><code class="language-x&quot;y">&quot;q&quot;</code></pre>"#
        );
    }

    #[test]
    fn test_image_title_only_when_present() {
        assert_eq!(
            spell(|out| HtmlBackend::image("a.png", "Alt", "", out)),
            r#"<img src="a.png" alt="Alt">"#
        );
        assert_eq!(
            spell(|out| HtmlBackend::image("a.png?x=1&y=2", "Alt", "Tip", out)),
            r#"<img src="a.png?x=1&amp;y=2" title="Tip" alt="Alt">"#
        );
    }

    #[test]
    fn test_structural_elements() {
        let html = spell(|out| {
            HtmlBackend::table_start(out);
            HtmlBackend::blockquote(true, out);
            HtmlBackend::task_list_marker(true, out);
            HtmlBackend::task_list_marker(false, out);
            HtmlBackend::blockquote(false, out);
            HtmlBackend::hard_break(out);
            HtmlBackend::horizontal_rule(out);
        });
        assert_eq!(
            html,
            concat!(
                r#"<table class="markdown-table"><blockquote>"#,
                r#"<input type="checkbox" checked disabled> "#,
                r#"<input type="checkbox" disabled> "#,
                "</blockquote><br><hr>"
            )
        );
    }
}
