//! Standalone HTML document shell.

use mdgram_renderer::escape_html;

/// Stylesheet inlined into every assembled document.
const DOCUMENT_STYLES: &str = r"    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Ubuntu, sans-serif;
      line-height: 1.6;
      color: #333;
      max-width: 900px;
      margin: 0 auto;
      padding: 20px;
      background-color: #f9f9f9;
    }
    .markdown-content {
      background: #fff;
      padding: 40px;
      border-radius: 8px;
      box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
    }
    .markdown-content h1, .markdown-content h2, .markdown-content h3,
    .markdown-content h4, .markdown-content h5, .markdown-content h6 {
      margin: 24px 0 16px;
      font-weight: 600;
      line-height: 1.25;
    }
    .markdown-content h1 { font-size: 2em; border-bottom: 1px solid #eaecef; padding-bottom: 0.3em; }
    .markdown-content h2 { font-size: 1.5em; border-bottom: 1px solid #eaecef; padding-bottom: 0.3em; }
    .markdown-content h3 { font-size: 1.25em; }
    .markdown-content code {
      background-color: rgba(27, 31, 35, 0.05);
      border-radius: 3px;
      padding: 0.2em 0.4em;
      font-family: 'Courier New', Courier, monospace;
      font-size: 0.9em;
    }
    .markdown-content pre {
      background-color: #f6f8fa;
      border-radius: 6px;
      padding: 16px;
      overflow: auto;
      line-height: 1.45;
    }
    .markdown-content pre code { background-color: transparent; padding: 0; }
    .mermaid-container {
      margin: 20px 0;
      padding: 20px;
      background-color: #f9f9f9;
      border: 1px solid #e1e4e8;
      border-radius: 8px;
    }
    .mermaid-container pre.mermaid {
      background-color: transparent;
      border: none;
      padding: 0;
      text-align: center;
    }
    .markdown-table { border-collapse: collapse; width: 100%; margin: 16px 0; }
    .markdown-table th, .markdown-table td { border: 1px solid #dfe2e5; padding: 6px 13px; }
    .markdown-table th { background-color: #f6f8fa; font-weight: 600; }
    .markdown-table tr:nth-child(even) { background-color: #f9f9f9; }
    .markdown-content blockquote {
      border-left: 4px solid #dfe2e5;
      margin-left: 0;
      padding-left: 16px;
      color: #6a737d;
    }
    .markdown-content a { color: #0366d6; text-decoration: none; }
    .markdown-content a:hover { text-decoration: underline; }
    .markdown-content img { max-width: 100%; height: auto; }
    .markdown-content ul, .markdown-content ol { padding-left: 2em; }
    .markdown-content li { margin: 0.25em 0; }
";

/// Wrap an HTML fragment into a complete document.
///
/// The fragment is inserted unindented so `<pre>` content keeps its exact
/// whitespace. `init_script` is appended after the content wrapper and may be
/// empty.
#[must_use]
pub fn assemble(fragment: &str, init_script: &str, title: &str) -> String {
    let mut html = String::with_capacity(fragment.len() + DOCUMENT_STYLES.len() + 512);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("  <title>");
    html.push_str(&escape_html(title));
    html.push_str("</title>\n  <style>\n");
    html.push_str(DOCUMENT_STYLES);
    html.push_str("  </style>\n</head>\n<body>\n");

    html.push_str("<div class=\"markdown-content\">\n");
    html.push_str(fragment);
    if !fragment.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</div>\n");

    if !init_script.is_empty() {
        html.push_str(init_script);
        html.push('\n');
    }

    html.push_str("</body>\n</html>\n");
    html
}
