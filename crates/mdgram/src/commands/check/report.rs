//! HTML reports for fixture checks.

use std::fmt::Write;

use mdgram_renderer::escape_html;

use super::compare::{Comparison, DiffLine};

const REPORT_STYLES: &str = r"
  body { font-family: 'Segoe UI', sans-serif; background: #f5f7fa; padding: 50px; color: #333; }
  h1 { text-align: center; color: #1e88e5; margin-bottom: 40px; }
  ul { list-style: none; padding: 0; max-width: 600px; margin: 0 auto; }
  li { background: #fff; margin-bottom: 15px; border-radius: 8px; padding: 15px 20px; border: 1px solid #ddd; }
  a { text-decoration: none; color: #1e88e5; font-weight: bold; font-size: 1.1rem; display: block; }
  a:hover { text-decoration: underline; }
  .status-badge { padding: 5px 10px; border-radius: 5px; font-size: 0.9rem; color: white; }
  .status-badge.passed { background-color: #2e7d32; }
  .status-badge.failed { background-color: #d32f2f; }
  pre { background: #eef; padding: 10px; border-radius: 5px; overflow-x: auto; }
  .diff { font-family: monospace; background: #fff; padding: 15px; border: 1px solid #ccc; border-radius: 5px; }
  .diff .added { color: #155724; background-color: #d4edda; }
  .diff .removed { color: #721c24; background-color: #f8d7da; }
  .diff .unchanged { color: #666; opacity: 0.6; }
";

/// Input for a single fixture report page.
pub(crate) struct CaseReport<'a> {
    pub(crate) name: &'a str,
    pub(crate) markdown: &'a str,
    pub(crate) expected: &'a str,
    pub(crate) actual: &'a str,
    pub(crate) comparison: &'a Comparison,
}

/// Link target and label for the index page.
pub(crate) struct IndexEntry {
    pub(crate) name: String,
    pub(crate) file: String,
    pub(crate) passed: bool,
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"UTF-8\">\n  \
         <title>{}</title>\n  <style>{REPORT_STYLES}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

fn badge(passed: bool, label: &str) -> String {
    let class = if passed { "passed" } else { "failed" };
    format!(r#"<span class="status-badge {class}">{label}</span>"#)
}

/// Render the report page for one fixture.
pub(crate) fn case_page(report: &CaseReport<'_>) -> String {
    let status = report.comparison.status;
    let name = escape_html(report.name);
    let mut body = String::new();

    writeln!(
        body,
        "<h1>Test: {name} {}</h1>",
        badge(status.is_passed(), status.as_str())
    )
    .unwrap();
    for (heading, content) in [
        ("Markdown Input", report.markdown),
        ("Expected HTML", report.expected),
        ("Actual HTML", report.actual),
    ] {
        writeln!(body, "<h2>{heading}</h2>\n<pre>{}</pre>", escape_html(content)).unwrap();
    }

    body.push_str("<h2>Diff</h2>\n<div class=\"diff\">\n");
    for line in &report.comparison.diff {
        let (class, marker, text) = match line {
            DiffLine::Unchanged(text) => ("unchanged", "", text),
            DiffLine::Removed(text) => ("removed", "- ", text),
            DiffLine::Added(text) => ("added", "+ ", text),
        };
        writeln!(
            body,
            r#"<div class="{class}">{marker}{}</div>"#,
            escape_html(text)
        )
        .unwrap();
    }
    body.push_str("</div>\n");

    page(&format!("Report - {}", report.name), &body)
}

/// Render the index page linking every fixture report.
///
/// Links are relative to the index location.
pub(crate) fn index_page(entries: &[IndexEntry]) -> String {
    let mut body = String::from("<h1>Test Execution Results</h1>\n<ul>\n");
    if entries.is_empty() {
        body.push_str("<li>No reports found.</li>\n");
    }
    for entry in entries {
        let label = if entry.passed { "PASSED" } else { "FAILED" };
        writeln!(
            body,
            r#"<li><a href="{}" target="_blank">{} {}</a></li>"#,
            escape_html(&entry.file),
            escape_html(&entry.name),
            badge(entry.passed, label)
        )
        .unwrap();
    }
    body.push_str("</ul>\n");
    page("All Test Reports", &body)
}
