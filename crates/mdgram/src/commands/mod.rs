//! CLI command implementations.

mod analyze;
mod check;
mod render;
mod tokens;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use mdgram_config::{CliSettings, Config, DiagramTheme, OptionsOverrides};
use mdgram_diagrams::IdSalt;
use mdgram_pipeline::Pipeline;
use serde_json::{Map, Value};

use crate::error::CliError;

pub(crate) use analyze::AnalyzeArgs;
pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;
pub(crate) use tokens::TokensArgs;

/// Parser options shared by commands that read markdown.
#[derive(Args, Debug, Default)]
pub(crate) struct ParserArgs {
    /// Mermaid theme (default, dark, forest, neutral, or any Mermaid theme name).
    #[arg(long)]
    theme: Option<String>,

    /// Extra `mermaid.initialize` options as a JSON object.
    #[arg(long, value_name = "JSON")]
    init_config: Option<String>,

    /// Disable tables, strikethrough and task lists.
    #[arg(long)]
    no_gfm: bool,

    /// Keep single newlines as soft breaks instead of `<br>`.
    #[arg(long)]
    no_hard_breaks: bool,

    /// Do not add `id` attributes to headings.
    #[arg(long)]
    no_header_ids: bool,

    /// Path to configuration file (default: auto-discover mdgram.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ParserArgs {
    /// Option overrides given on the command line.
    fn overrides(&self) -> Result<OptionsOverrides, CliError> {
        let diagram_init_config = self
            .init_config
            .as_deref()
            .map(parse_init_config)
            .transpose()?;

        Ok(OptionsOverrides {
            diagram_theme: self.theme.as_deref().map(DiagramTheme::from),
            github_flavored_extensions: self.no_gfm.then_some(false),
            line_breaks_as_hard_breaks: self.no_hard_breaks.then_some(false),
            emit_header_ids: self.no_header_ids.then_some(false),
            diagram_init_config,
            ..OptionsOverrides::default()
        })
    }

    /// Load configuration with these flags applied on top.
    pub(crate) fn load_config(&self, title: Option<String>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            parser: self.overrides()?,
            title,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        Ok(config)
    }

    /// Build a pipeline from the loaded configuration.
    pub(crate) fn pipeline(
        &self,
        title: Option<String>,
        salt: Option<u64>,
    ) -> Result<Pipeline, CliError> {
        let config = self.load_config(title)?;
        let mut pipeline =
            Pipeline::new(config.parser).with_document_title(config.document.title);
        if let Some(salt) = salt {
            pipeline = pipeline.with_id_salt(IdSalt::Fixed(salt));
        }
        Ok(pipeline)
    }
}

fn parse_init_config(json: &str) -> Result<Map<String, Value>, CliError> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::Validation(
            "--init-config must be a JSON object".to_owned(),
        )),
    }
}

/// Read markdown from a file, or from stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        return Ok(std::io::read_to_string(std::io::stdin())?);
    }
    std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))
}

/// Write `content` to a file, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| CliError::file(parent, e))?;
            }
            std::fs::write(path, content).map_err(|e| CliError::file(path, e))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}
