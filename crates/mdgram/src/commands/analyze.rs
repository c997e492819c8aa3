//! `mdgram analyze` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use mdgram_pipeline::Analysis;

use super::{ParserArgs, read_input, write_output};
use crate::error::CliError;

/// Arguments for the analyze command.
#[derive(Args)]
pub(crate) struct AnalyzeArgs {
    /// Markdown file to analyze (`-` reads stdin).
    input: PathBuf,

    /// Print the analysis as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    parser: ParserArgs,
}

impl AnalyzeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let pipeline = self.parser.pipeline(None, None)?;
        let markdown = read_input(&self.input)?;
        let analysis = pipeline.analyze(&markdown);

        let content = if self.json {
            serde_json::to_string_pretty(&analysis)?
        } else {
            format_analysis(&analysis)
        };
        write_output(None, &content)
    }
}

/// Human-readable analysis summary.
fn format_analysis(analysis: &Analysis) -> String {
    let mut out = String::new();
    writeln!(out, "Top-level blocks: {}", analysis.token_count).unwrap();
    writeln!(out, "Mermaid diagrams: {}", analysis.diagram_count).unwrap();
    if analysis.code_blocks.is_empty() {
        out.push_str("Code blocks by language: none\n");
    } else {
        out.push_str("Code blocks by language:\n");
        for (language, count) in &analysis.code_blocks {
            writeln!(out, "  {language}: {count}").unwrap();
        }
    }
    out
}
