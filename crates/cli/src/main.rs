// colab CLI - employee roster views over the database and the published sheet

mod exit_codes;
mod logging;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use colab_config::Settings;

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};
use recon::OutputOptions;

#[derive(Parser)]
#[command(name = "colab")]
#[command(about = "Reconcile database employees with the published HR spreadsheet")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (default: <config dir>/colab/colab.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database holding the `pessoas` table
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Sheet layout TOML (preamble lines, header aliases, fill columns)
    #[arg(long, global = true)]
    layout: Option<PathBuf>,

    /// Print records as JSON to stdout
    #[arg(long, global = true)]
    json: bool,

    /// Write records as JSON to file
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// No summary on stderr; only warnings are logged
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Active employees from the database
    #[command(after_help = "\
Examples:
  colab db --json
  colab db --db /srv/rh/pessoas.db --output employees.json")]
    Db,

    /// Cleaned records from the published spreadsheet
    #[command(after_help = "\
Examples:
  colab sheet --url 'https://docs.google.com/spreadsheets/d/e/XYZ/pub?output=csv' --json
  colab sheet --url quadro.csv --layout layout.toml --json
  RUST_LOG=colab=debug colab sheet --url quadro.csv   # list every skipped row")]
    Sheet {
        /// Sheet location: http(s) URL or local CSV path (default: settings)
        #[arg(long)]
        url: Option<String>,
    },

    /// Database employees augmented with role and salary from the sheet
    #[command(after_help = "\
Examples:
  colab combined --json
  colab combined --url quadro.csv --db pessoas.db --output combined.json")]
    Combined {
        /// Sheet location: http(s) URL or local CSV path (default: settings)
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.quiet);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = resolve_settings(&cli)?;
    let out = OutputOptions {
        json: cli.json,
        output: cli.output,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Db => recon::cmd_db(&settings, &out),
        Commands::Sheet { url } => recon::cmd_sheet(&settings, url, &out),
        Commands::Combined { url } => recon::cmd_combined(&settings, url, &out),
    }
}

/// Defaults < settings file < environment < flags.
fn resolve_settings(cli: &Cli) -> Result<Settings, CliError> {
    let mut settings = Settings::load(cli.config.as_deref()).map_err(|e| {
        let path = match &cli.config {
            Some(p) => p.display().to_string(),
            None => Settings::config_path_display(),
        };
        CliError::args(e.to_string()).with_hint(format!("settings file: {path}"))
    })?;

    if let Some(db) = &cli.db {
        settings.database.path = db.clone();
    }
    if let Some(layout) = &cli.layout {
        settings.layout = Some(layout.clone());
    }
    tracing::debug!(?settings, "resolved settings");
    Ok(settings)
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
