//! Command translation: typed command -> concrete toolchain invocation.
//!
//! Two invocation shapes exist. Batch mode passes `--check` and lets
//! the compiler typecheck the whole file. Interactive mode loads the
//! file into the toolchain's read-eval-print session and feeds it a
//! single instruction line (`:t`, `:ac`, `:cs`).

use std::path::PathBuf;

use inkproto::{Command, RelayError};

/// How the toolchain is driven for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// `idris --check <file>`, no interactive instruction.
    Check,
    /// Load `<file>` into the interactive session, then issue one
    /// instruction line.
    Repl { instruction: String },
}

/// A concrete invocation, bound to one workspace by the caller.
/// Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Workspace-relative source file to load.
    pub file: PathBuf,
    pub mode: Mode,
}

/// Map a validated command onto an invocation.
///
/// Pure: same command, same invocation. The match is exhaustive, so a
/// new action is a compile-time-checked change here and in `interpret`.
///
/// `Command::parse` has already rejected incomplete commands; this
/// signature still returns `Result` so callers constructing commands
/// directly (tests, the quill CLI) cannot reach the invoker with one
/// that slipped through.
pub fn translate(command: &Command) -> Result<Invocation, RelayError> {
    let file = PathBuf::from(command.file());
    let mode = match command {
        Command::Check { .. } => Mode::Check,
        Command::Typeof { expr, .. } => Mode::Repl {
            instruction: format!(":t {expr}"),
        },
        Command::AddClause {
            line,
            function_name,
            ..
        } => Mode::Repl {
            instruction: format!(":ac {line} {function_name}"),
        },
        Command::CaseSplit {
            line, case_target, ..
        } => Mode::Repl {
            instruction: format!(":cs {line} {case_target}"),
        },
    };
    Ok(Invocation { file, mode })
}
