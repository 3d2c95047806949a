//! CLI Exit Code Registry
//!
//! Single source of truth for `clubdir` exit codes. Scripts rely on them,
//! so existing values never change meaning.
//!
//! | Code | Meaning                                               |
//! |------|-------------------------------------------------------|
//! | 0    | Success                                               |
//! | 1    | General error (unspecified)                           |
//! | 2    | Usage error (bad arguments; also what clap exits with) |
//! | 3    | Config or alias table invalid                         |
//! | 4    | Data snapshot unreadable or malformed, output not written |
//! | 5    | `--strict` and some event labels stayed unmatched     |

use clubdir_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, invalid option values.
pub const EXIT_USAGE: u8 = 2;

/// Config file or alias table failed to parse or validate.
pub const EXIT_CONFIG_INVALID: u8 = 3;

/// A snapshot could not be read or parsed, or the mapping could not be written.
pub const EXIT_DATA: u8 = 4;

/// `--strict` was given and at least one event label matched no club.
pub const EXIT_UNMATCHED: u8 = 5;

/// Exit code for a library error.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) | ReconError::AliasParse(_) => {
            EXIT_CONFIG_INVALID
        }
        ReconError::DataParse { .. } | ReconError::Serialize(_) | ReconError::Io(_) => EXIT_DATA,
    }
}
