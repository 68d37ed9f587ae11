use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use blux::{util, Config, RenderOptions};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

/// Read-only viewer for BLUX run artifacts (JSON only).
#[derive(Parser, Debug)]
#[command(name = "blux", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory containing intent.json, coga.json, ca.json, verdicts.json, receipt.json, report.json
    #[arg(long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Config file (defaults to ~/.blux/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Data directory (defaults to ~/.blux)
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Fail on unreadable or malformed JSON instead of rendering a placeholder
    #[arg(long, global = true)]
    strict: bool,

    /// Indent width for JSON panels
    #[arg(long, value_name = "N", global = true)]
    indent: Option<usize>,

    /// Skip raw panels for JSON files outside the known set
    #[arg(long, global = true)]
    no_raw: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a run directory.
    View {
        /// Root directory containing the run's JSON artifacts
        #[arg(long, value_name = "DIR")]
        root: PathBuf,
    },
}

impl Cli {
    fn run_dir(&self) -> PathBuf {
        match (&self.command, &self.input_dir) {
            (Some(Command::View { root }), None) => root.clone(),
            (None, Some(dir)) => dir.clone(),
            (Some(_), Some(_)) => Cli::command()
                .error(
                    ErrorKind::ArgumentConflict,
                    "--input-dir cannot be combined with the view subcommand",
                )
                .exit(),
            (None, None) => Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "a run directory is required: use `view --root DIR` or `--input-dir DIR`",
                )
                .exit(),
        }
    }

    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load(),
        };
        if self.strict {
            config = config.with_strict(true);
        }
        if let Some(indent) = self.indent {
            config = config.with_indent(indent);
        }
        if self.no_raw {
            config = config.with_raw_json(false);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    let config = cli.load_config()?;
    let directory = util::resolve_input_dir(&cli.run_dir());
    tracing::debug!(directory = %directory.display(), ?config, "Rendering run directory");

    let report = blux::render_directory(&directory, &RenderOptions::from(&config))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    report
        .write_to(&mut out)
        .and_then(|()| out.flush())
        .context("Failed to write report")?;
    Ok(())
}
