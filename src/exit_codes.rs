//! Exit code constants for the proghost CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unknown program, invalid config)
//! - 2: The program ran and reported a failure outcome
//! - 3: Host failure (interpreter missing, crashed, or timed out)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unknown or ambiguous program, invalid config.
pub const USER_ERROR: i32 = 1;

/// The target program failed (raised, missing entry point, timed out).
pub const PROGRAM_FAILURE: i32 = 2;

/// The host could not drive the interpreter.
pub const HOST_FAILURE: i32 = 3;
