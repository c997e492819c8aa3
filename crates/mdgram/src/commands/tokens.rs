//! `mdgram tokens` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{ParserArgs, read_input, write_output};
use crate::error::CliError;

/// Arguments for the tokens command.
#[derive(Args)]
pub(crate) struct TokensArgs {
    /// Markdown file to tokenize (`-` reads stdin).
    input: PathBuf,

    /// Only print top-level blocks.
    #[arg(long)]
    top_level: bool,

    #[command(flatten)]
    parser: ParserArgs,
}

impl TokensArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let pipeline = self.parser.pipeline(None, None)?;
        let markdown = read_input(&self.input)?;

        let mut tokens = pipeline.tokenize(&markdown);
        if self.top_level {
            tokens.retain(mdgram_renderer::Token::is_top_level);
        }

        write_output(None, &serde_json::to_string_pretty(&tokens)?)
    }
}
