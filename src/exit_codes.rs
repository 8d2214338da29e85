//! Exit code constants for the runbook CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid roots, bad configuration)
//! - 2: Task failure (task not found or malformed, missing env vars or context)
//! - 3: Backend failure (transport or API error from the completion call)
//! - 4: Malformed response (commit/patch markers missing or out of order)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing roots, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Task failure: the task could not be resolved or its inputs aggregated.
pub const TASK_FAILURE: i32 = 2;

/// Backend failure: the text-generation backend could not produce a reply.
pub const BACKEND_FAILURE: i32 = 3;

/// Malformed response: the backend reply does not follow the marker grammar.
pub const RESPONSE_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            TASK_FAILURE,
            BACKEND_FAILURE,
            RESPONSE_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }
}
