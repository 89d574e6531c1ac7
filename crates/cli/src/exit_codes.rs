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
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | settings         | Settings file codes                      |
//! | 10-19   | grants           | Grant fixture file codes                 |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use grantime_compliance::ComplianceError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Settings (3-9)
// =============================================================================

/// Settings file could not be written (`config init`), or already exists.
pub const EXIT_SETTINGS: u8 = 3;

// =============================================================================
// Grants (10-19)
// =============================================================================

/// Grant fixture file failed to parse or validate.
pub const EXIT_GRANTS_INVALID: u8 = 10;

/// Map a grant store error to its exit code.
///
/// A fixture that cannot be read at all is a usage problem (wrong path);
/// everything else means the file itself is bad.
pub fn grants_exit_code(err: &ComplianceError) -> u8 {
    match err {
        ComplianceError::Io(_) => EXIT_USAGE,
        _ => EXIT_GRANTS_INVALID,
    }
}
