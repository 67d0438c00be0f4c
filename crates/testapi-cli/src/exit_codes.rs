//! Process exit codes for the `testapi` binary.
//! Library errors keep their own codes (see `TestApiError::exit_code`).

use testapi_report::TestApiError;

pub const SUCCESS: i32 = 0;
pub const INCOMPLETE_REPORT: i32 = 3; // --strict and at least one case could not be fetched
pub const INTERNAL_ERROR: i32 = 2; // Anything that is not a TestApiError

/// Exit code for an error that escaped a command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<TestApiError>()
        .map(TestApiError::exit_code)
        .unwrap_or(INTERNAL_ERROR)
}
