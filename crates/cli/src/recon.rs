//! `colab db|sheet|combined` — the three employee views.

use std::path::{Path, PathBuf};

use serde::Serialize;

use colab_config::Settings;
use colab_io::{SheetFetcher, SqliteSource};
use colab_recon::{ReconError, SheetLayout, SourceKind};

use crate::exit_codes::{recon_exit_code, EXIT_ERROR, EXIT_USAGE};
use crate::CliError;

/// Where a view's JSON goes and whether to narrate on stderr.
pub struct OutputOptions {
    pub json: bool,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

impl CliError {
    /// Create error from a pipeline error with its registry exit code.
    pub fn recon(err: ReconError) -> Self {
        let hint = match &err {
            ReconError::SourceUnavailable { source: SourceKind::Authoritative, .. } => {
                Some("check --db or COLAB_DB_PATH".to_string())
            }
            ReconError::SourceUnavailable { source: SourceKind::External, .. } => {
                Some("check --url or COLAB_SHEET_URL; the sheet must be published as CSV".to_string())
            }
            ReconError::EmptyInput { .. } => {
                Some("the sheet may have fewer preamble lines than skip_rows".to_string())
            }
            _ => None,
        };
        Self { code: recon_exit_code(&err), message: err.to_string(), hint }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Layout from the configured TOML file, or the built-in layout.
pub fn load_layout(settings: &Settings) -> Result<SheetLayout, CliError> {
    let Some(path) = &settings.layout else {
        return Ok(SheetLayout::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_USAGE,
        message: format!("cannot read layout {}: {e}", path.display()),
        hint: None,
    })?;
    SheetLayout::from_toml(&text).map_err(CliError::recon)
}

/// Sheet location from `--url`, else from settings.
pub fn sheet_location(url: Option<String>, settings: &Settings) -> Result<String, CliError> {
    url.or_else(|| settings.sheet.url.clone())
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| {
            CliError::args("no spreadsheet location given")
                .with_hint("pass --url, set COLAB_SHEET_URL, or set [sheet] url in the settings file")
        })
}

fn emit<T: Serialize + ?Sized>(value: &T, out: &OutputOptions) -> Result<(), CliError> {
    if !out.json && out.output.is_none() {
        return Ok(());
    }
    let json_str = serde_json::to_string_pretty(value).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("JSON serialization error: {e}"),
        hint: None,
    })?;

    if let Some(ref path) = out.output {
        write_output(path, &json_str)?;
        if !out.quiet {
            eprintln!("wrote {}", path.display());
        }
    }
    if out.json {
        println!("{json_str}");
    }
    Ok(())
}

fn write_output(path: &Path, json_str: &str) -> Result<(), CliError> {
    std::fs::write(path, json_str).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot write output {}: {e}", path.display()),
        hint: None,
    })
}

// ============================================================================
// Commands
// ============================================================================

pub fn cmd_db(settings: &Settings, out: &OutputOptions) -> Result<(), CliError> {
    let source = SqliteSource::new(&settings.database.path);
    let employees = colab_recon::authoritative_view(&source).map_err(CliError::recon)?;

    emit(&employees, out)?;
    if !out.quiet {
        eprintln!("database: {} active employees", employees.len());
    }
    Ok(())
}

pub fn cmd_sheet(
    settings: &Settings,
    url: Option<String>,
    out: &OutputOptions,
) -> Result<(), CliError> {
    let location = sheet_location(url, settings)?;
    let layout = load_layout(settings)?;
    let fetcher = SheetFetcher::from_settings(&settings.sheet).map_err(CliError::recon)?;

    let load = colab_recon::external_view(&fetcher, &location, &layout).map_err(CliError::recon)?;

    emit(&load.records, out)?;
    if !out.quiet {
        eprintln!(
            "sheet: {} records from {} rows, {} skipped",
            load.records.len(),
            load.rows_read,
            load.skipped.len(),
        );
        if !load.missing_columns.is_empty() {
            eprintln!("sheet: missing columns: {}", load.missing_columns.join(", "));
        }
    }
    Ok(())
}

pub fn cmd_combined(
    settings: &Settings,
    url: Option<String>,
    out: &OutputOptions,
) -> Result<(), CliError> {
    let location = sheet_location(url, settings)?;
    let layout = load_layout(settings)?;
    let source = SqliteSource::new(&settings.database.path);
    let fetcher = SheetFetcher::from_settings(&settings.sheet).map_err(CliError::recon)?;

    let result = colab_recon::combined_view(&source, &fetcher, &location, &layout)
        .map_err(CliError::recon)?;

    emit(&result.records, out)?;
    if !out.quiet {
        let s = &result.summary;
        eprintln!(
            "combined: {} employees, {} matched, {} unmatched ({} sheet records, {} rows skipped)",
            s.authoritative,
            s.matched,
            s.unmatched,
            s.external,
            result.skipped.len(),
        );
    }
    Ok(())
}
