//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, bad settings) |
//! | 50-59   | sources          | Database and spreadsheet pipeline codes  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `recon_exit_code` or the relevant command

use colab_recon::{ReconError, SourceKind};

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable or invalid settings, no sheet location.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Sources (50-59)
// =============================================================================

/// Database could not be opened or queried.
pub const EXIT_DB_UNAVAILABLE: u8 = 50;

/// Spreadsheet could not be fetched (network failure, non-2xx, missing file).
pub const EXIT_SHEET_UNAVAILABLE: u8 = 51;

/// A source had no usable records where the combined view needs some.
pub const EXIT_EMPTY_RESULT: u8 = 52;

/// Spreadsheet has nothing after its preamble lines.
pub const EXIT_EMPTY_INPUT: u8 = 53;

/// Sheet layout file does not parse or does not validate.
pub const EXIT_LAYOUT_INVALID: u8 = 54;

// =============================================================================
// Pipeline Error Types
// =============================================================================

/// Map a ReconError to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::SourceUnavailable { source: SourceKind::Authoritative, .. } => {
            EXIT_DB_UNAVAILABLE
        }
        ReconError::SourceUnavailable { source: SourceKind::External, .. } => {
            EXIT_SHEET_UNAVAILABLE
        }
        ReconError::EmptyResult { .. } => EXIT_EMPTY_RESULT,
        ReconError::EmptyInput { .. } => EXIT_EMPTY_INPUT,
        ReconError::LayoutParse(_) | ReconError::LayoutValidation(_) => EXIT_LAYOUT_INVALID,
        ReconError::Unexpected(_) => EXIT_ERROR,
    }
}
