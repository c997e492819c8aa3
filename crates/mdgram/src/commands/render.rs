//! `mdgram render` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{ParserArgs, read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (`-` reads stdin).
    input: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit only the HTML fragment, without the document shell and script.
    #[arg(long, conflicts_with = "json")]
    fragment: bool,

    /// Print the parse result as JSON.
    #[arg(long)]
    json: bool,

    /// Document title (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Fixed uniqueness token for diagram ids (default: current time).
    #[arg(long)]
    id_salt: Option<u64>,

    #[command(flatten)]
    parser: ParserArgs,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let pipeline = self.parser.pipeline(self.title.clone(), self.id_salt)?;
        let markdown = read_input(&self.input)?;
        let result = pipeline.parse(&markdown);

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        tracing::info!(
            input = %self.input.display(),
            diagrams = result.diagram_count,
            elapsed_ms = result.metadata.elapsed_ms,
            "Rendered markdown"
        );

        let content = if self.json {
            serde_json::to_string_pretty(&result)?
        } else if self.fragment {
            result.html.clone()
        } else {
            pipeline.document(&result)
        };

        write_output(self.output.as_deref(), &content)?;

        if let Some(path) = &self.output {
            output.success(&format!(
                "Rendered {} ({} diagrams) to {}",
                self.input.display(),
                result.diagram_count,
                path.display()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RenderArgs,
    }

    fn parse(args: &[&str]) -> RenderArgs {
        TestCli::try_parse_from(std::iter::once("render").chain(args.iter().copied()))
            .unwrap()
            .args
    }

    fn write_fixture(dir: &std::path::Path) -> (PathBuf, PathBuf) {
        let config = dir.join("mdgram.toml");
        std::fs::write(&config, "").unwrap();
        let input = dir.join("doc.md");
        std::fs::write(
            &input,
            "# Doc\n\n```mermaid\nflowchart TD\n  A --> B\n```\n",
        )
        .unwrap();
        (config, input)
    }

    #[test]
    fn test_render_document_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, input) = write_fixture(dir.path());
        let out = dir.path().join("doc.html");

        parse(&[
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
            "--theme",
            "dark",
            "--title",
            "Doc Title",
        ])
        .execute()
        .unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Doc Title</title>"));
        assert!(html.contains(r#"data-diagram-type="flowchart""#));
        assert!(html.contains("\"theme\": \"dark\""));
    }

    #[test]
    fn test_render_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let (config, input) = write_fixture(dir.path());
        let out = dir.path().join("doc.html");

        parse(&[
            input.to_str().unwrap(),
            "--fragment",
            "--id-salt",
            "3",
            "-o",
            out.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
        ])
        .execute()
        .unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.starts_with(r#"<h1 id="doc">Doc</h1>"#));
        assert!(html.contains(r#"id="mermaid-diagram-0-3""#));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_render_json() {
        let dir = tempfile::tempdir().unwrap();
        let (config, input) = write_fixture(dir.path());
        let out = dir.path().join("doc.json");

        parse(&[
            input.to_str().unwrap(),
            "--json",
            "-o",
            out.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
        ])
        .execute()
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["diagramCount"], 1);
        assert_eq!(json["diagrams"][0]["diagramType"], "flowchart");
    }

    #[test]
    fn test_fragment_conflicts_with_json() {
        let result = TestCli::try_parse_from(["render", "doc.md", "--fragment", "--json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let (config, _) = write_fixture(dir.path());
        let missing = dir.path().join("missing.md");

        let err = parse(&[
            missing.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
        ])
        .execute()
        .unwrap_err();
        assert!(matches!(err, CliError::File { .. }));
    }
}
