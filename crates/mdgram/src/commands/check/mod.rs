//! `mdgram check` command implementation.
//!
//! Renders markdown fixtures and compares them against expected HTML,
//! writing the actual output and an HTML report per fixture.

mod compare;
mod report;

use std::path::{Path, PathBuf};

use clap::Args;
use mdgram_pipeline::Pipeline;

use self::compare::compare;
use self::report::{CaseReport, IndexEntry};
use super::{ParserArgs, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Fixture pairs: EXPECTED.html INPUT.md [EXPECTED.html INPUT.md ...]
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Directory for actual output and reports.
    #[arg(long, default_value = "mdgram-reports")]
    report_dir: PathBuf,

    /// Uniqueness token for diagram ids, fixed so output is reproducible.
    #[arg(long, default_value_t = 0)]
    id_salt: u64,

    #[command(flatten)]
    parser: ParserArgs,
}

struct Fixture<'a> {
    name: String,
    expected: &'a Path,
    input: &'a Path,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if self.files.len() % 2 != 0 {
            return Err(CliError::Validation(
                "check expects pairs of EXPECTED.html INPUT.md".to_owned(),
            ));
        }

        let pipeline = self.parser.pipeline(None, Some(self.id_salt))?;
        let fixtures: Vec<Fixture<'_>> = self
            .files
            .chunks_exact(2)
            .map(|pair| Fixture {
                name: fixture_name(&pair[1]),
                expected: &pair[0],
                input: &pair[1],
            })
            .collect();

        let mut entries = Vec::with_capacity(fixtures.len());
        for fixture in &fixtures {
            if !fixture.expected.is_file() || !fixture.input.is_file() {
                output.warning(&format!("Skipped: missing files for {}", fixture.name));
                continue;
            }

            let passed = match self.run_fixture(&pipeline, fixture) {
                Ok(passed) => passed,
                Err(e) => {
                    tracing::error!(fixture = %fixture.name, error = %e, "Check failed");
                    output.error(&format!("Error processing {}: {e}", fixture.name));
                    false
                }
            };
            output.check_status(&fixture.name, passed);
            entries.push(IndexEntry {
                name: fixture.name.clone(),
                file: format!("reports/{}.report.html", fixture.name),
                passed,
            });
        }

        let index = self.report_dir.join("index.html");
        write_output(Some(&index), &report::index_page(&entries))?;

        let total = entries.len();
        let failed = entries.iter().filter(|e| !e.passed).count();

        output.separator();
        output.info(&format!(
            "{} passed, {failed} failed, {} skipped",
            total - failed,
            fixtures.len() - total
        ));
        output.highlight(&format!("Report: {}", index.display()));

        if failed > 0 {
            return Err(CliError::CheckFailed { failed, total });
        }
        Ok(())
    }

    /// Render one fixture, write its artifacts and report whether it passed.
    fn run_fixture(&self, pipeline: &Pipeline, fixture: &Fixture<'_>) -> Result<bool, CliError> {
        let markdown = std::fs::read_to_string(fixture.input)
            .map_err(|e| CliError::file(fixture.input, e))?;
        let expected = std::fs::read_to_string(fixture.expected)
            .map_err(|e| CliError::file(fixture.expected, e))?;

        let actual = pipeline.parse(&markdown).html;

        let actual_path = self
            .report_dir
            .join("actual")
            .join(format!("{}.actual.html", fixture.name));
        write_output(Some(&actual_path), &actual)?;

        let comparison = compare(&expected, &actual);
        let page = report::case_page(&CaseReport {
            name: &fixture.name,
            markdown: &markdown,
            expected: &expected,
            actual: &actual,
            comparison: &comparison,
        });
        let report_path = self
            .report_dir
            .join("reports")
            .join(format!("{}.report.html", fixture.name));
        write_output(Some(&report_path), &page)?;

        tracing::debug!(
            fixture = %fixture.name,
            status = comparison.status.as_str(),
            "Compared fixture"
        );
        Ok(comparison.status.is_passed())
    }
}

/// Fixture name: the input file name without its extension.
fn fixture_name(input: &Path) -> String {
    input
        .file_stem()
        .map_or_else(|| input.display().to_string(), |s| s.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: CheckArgs,
    }

    fn run(dir: &Path, files: &[&Path]) -> Result<(), CliError> {
        let config = dir.join("mdgram.toml");
        std::fs::write(&config, "").unwrap();
        let report_dir = dir.join("reports-out");

        let mut argv = vec![
            "check".to_owned(),
            "--report-dir".to_owned(),
            report_dir.display().to_string(),
            "-c".to_owned(),
            config.display().to_string(),
        ];
        argv.extend(files.iter().map(|f| f.display().to_string()));
        TestCli::try_parse_from(argv).unwrap().args.execute()
    }

    fn fixture(dir: &Path, name: &str, markdown: &str, expected: &str) -> (PathBuf, PathBuf) {
        let md = dir.join(format!("{name}.md"));
        let html = dir.join(format!("{name}.html"));
        std::fs::write(&md, markdown).unwrap();
        std::fs::write(&html, expected).unwrap();
        (html, md)
    }

    #[test]
    fn test_fixture_name() {
        assert_eq!(fixture_name(Path::new("tests/basic.md")), "basic");
        assert_eq!(fixture_name(Path::new("notes.v2.md")), "notes.v2");
    }

    #[test]
    fn test_passing_fixture_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let (html, md) = fixture(
            dir.path(),
            "basic",
            "# Title\n\nSome text.\n",
            "<h1 id=\"title\">Title</h1>\n\n<p>Some text.</p>\n",
        );

        run(dir.path(), &[&html, &md]).unwrap();

        let out = dir.path().join("reports-out");
        let actual = std::fs::read_to_string(out.join("actual/basic.actual.html")).unwrap();
        assert!(actual.contains("<p>Some text.</p>"));
        let report = std::fs::read_to_string(out.join("reports/basic.report.html")).unwrap();
        assert!(report.contains("status-badge passed"));
        let index = std::fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains(r#"href="reports/basic.report.html""#));
    }

    #[test]
    fn test_diagram_fixture_uses_fixed_salt() {
        let dir = tempfile::tempdir().unwrap();
        let (html, md) = fixture(
            dir.path(),
            "diagram",
            "```mermaid\npie\n  \"A\" : 1\n```\n",
            "<div class=\"mermaid-container\" data-diagram-type=\"pie\">\
             <pre class=\"mermaid\" id=\"mermaid-diagram-0-0\">pie\n  \"A\" : 1</pre></div>\n",
        );

        run(dir.path(), &[&html, &md]).unwrap();
    }

    #[test]
    fn test_failing_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let (html, md) = fixture(dir.path(), "wrong", "actual text\n", "<p>expected text</p>\n");

        let err = run(dir.path(), &[&html, &md]).unwrap_err();
        assert!(matches!(err, CliError::CheckFailed { failed: 1, total: 1 }));

        let report = std::fs::read_to_string(
            dir.path().join("reports-out/reports/wrong.report.html"),
        )
        .unwrap();
        assert!(report.contains("status-badge failed"));
        assert!(report.contains(r#"<div class="removed">- &lt;p&gt;expected text&lt;/p&gt;</div>"#));
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing_html = dir.path().join("gone.html");
        let missing_md = dir.path().join("gone.md");

        run(dir.path(), &[&missing_html, &missing_md]).unwrap();

        let index = std::fs::read_to_string(dir.path().join("reports-out/index.html")).unwrap();
        assert!(index.contains("No reports found."));
    }

    #[test]
    fn test_odd_file_count_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (html, _) = fixture(dir.path(), "basic", "x", "<p>x</p>");

        let err = run(dir.path(), &[&html]).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }
}
