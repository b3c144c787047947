//! Exit codes for triagectl
//!
//! Values follow sysexits.h where one fits.

use triage_common::TriageError;

/// Exit code for success, including logs with no errors in them
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the compiler log cannot be read (EX_NOINPUT)
pub const EXIT_INPUT_UNAVAILABLE: i32 = 66;

/// Exit code for an unreadable or invalid configuration (EX_CONFIG)
pub const EXIT_CONFIG_ERROR: i32 = 78;

/// Map a failure to its exit code, looking through anyhow context layers.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TriageError>() {
        Some(TriageError::InputUnavailable { .. }) => EXIT_INPUT_UNAVAILABLE,
        Some(TriageError::ConfigIo { .. }) | Some(TriageError::Config(_)) => EXIT_CONFIG_ERROR,
        None => EXIT_GENERAL_ERROR,
    }
}

/// Machine-readable error kind for logs and `--json` failures
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<TriageError>()
        .map_or("internal", TriageError::code)
}
