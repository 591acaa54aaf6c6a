//! Relay-level error taxonomy.
//!
//! Toolchain diagnostics are deliberately absent here: non-zero exit
//! status and compiler error text are payload the user needs to see,
//! not relay errors. They flow through the normal display-action path.

use thiserror::Error;

/// Errors the relay can hit before or around a toolchain invocation.
///
/// All of these short-circuit the request; none of them is retried. On
/// the wire they are rendered as a plain error string rather than a
/// display action.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Malformed or incomplete command. Detected at the boundary,
    /// before any subprocess is spawned.
    #[error("unrecognized command: {0}")]
    UnrecognizedCommand(String),

    /// Staging the uploaded files into the workspace failed.
    #[error("workspace error: {0}")]
    Workspace(String),

    /// The toolchain executable could not be started at all.
    #[error("failed to launch toolchain: {0}")]
    ProcessLaunchFailure(#[from] std::io::Error),

    /// The subprocess exceeded its wall-clock bound and was killed.
    #[error("toolchain timed out after {secs}s")]
    Timeout { secs: u64 },
}
