//! mdgram CLI - Markdown to HTML with Mermaid diagrams.
//!
//! Provides commands for:
//! - `render`: Render a markdown file to a standalone HTML document
//! - `analyze`: Summarize blocks, code languages and diagrams
//! - `tokens`: Dump block tokens as JSON
//! - `check`: Compare rendered fragments against expected HTML fixtures

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AnalyzeArgs, CheckArgs, RenderArgs, TokensArgs};
use output::Output;

/// mdgram - Markdown to HTML with client-side Mermaid diagrams.
#[derive(Parser)]
#[command(name = "mdgram", version, about)]
struct Cli {
    /// Enable info-level logging (otherwise RUST_LOG applies).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown to HTML.
    Render(RenderArgs),
    /// Summarize a markdown document without rendering it.
    Analyze(AnalyzeArgs),
    /// Print block tokens as JSON.
    Tokens(TokensArgs),
    /// Render fixtures and compare them with expected HTML.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Analyze(args) => args.execute(),
        Commands::Tokens(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
