//! Result interpretation: raw toolchain text -> typed display action.
//!
//! The policy is fixed per action:
//!
//! - `check` / `typeof`: always show the text (empty text means the
//!   client renders its "no issues" message).
//! - `addClause`: a single-line answer is a generated clause and is
//!   inserted at the command's line; anything multi-line is an error
//!   message and is shown as text instead.
//! - `caseSplit`: the output replaces the target line unconditionally.
//!   A failed split therefore splices the error message into the
//!   buffer. Known sharp edge; see DESIGN.md before changing it.

use inkproto::{Command, DisplayAction};

use crate::invoke::ToolOutput;

/// Classify toolchain output according to the action that produced it.
pub fn interpret(command: &Command, output: &ToolOutput) -> DisplayAction {
    let text = output.stdout.trim();
    match command {
        Command::Check { .. } | Command::Typeof { .. } => DisplayAction::ShowText {
            text: text.to_string(),
        },
        Command::AddClause { line, .. } => {
            if !text.is_empty() && text.lines().count() == 1 {
                DisplayAction::Insert {
                    to_insert: text.to_string(),
                    line: *line,
                }
            } else {
                DisplayAction::ShowText {
                    text: text.to_string(),
                }
            }
        }
        Command::CaseSplit { line, .. } => DisplayAction::Replace {
            to_replace: text.to_string(),
            line: *line,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(stdout: &str) -> ToolOutput {
        ToolOutput {
            stdout: stdout.to_string(),
            exit_code: 0,
        }
    }

    #[test]
    fn test_check_always_shows_text() {
        let cmd = Command::Check {
            file: "Main.idr".to_string(),
        };
        let action = interpret(&cmd, &output("Type checking ./Main.idr"));
        assert_eq!(
            action,
            DisplayAction::ShowText {
                text: "Type checking ./Main.idr".to_string()
            }
        );
    }

    #[test]
    fn test_check_with_empty_output_shows_empty_text() {
        let cmd = Command::Check {
            file: "Main.idr".to_string(),
        };
        // Empty text; the client renders "No type errors."
        assert_eq!(
            interpret(&cmd, &output("")),
            DisplayAction::ShowText {
                text: String::new()
            }
        );
    }

    #[test]
    fn test_typeof_shows_text() {
        let cmd = Command::Typeof {
            file: "Main.idr".to_string(),
            expr: "plus".to_string(),
        };
        assert_eq!(
            interpret(&cmd, &output("plus : Nat -> Nat -> Nat")),
            DisplayAction::ShowText {
                text: "plus : Nat -> Nat -> Nat".to_string()
            }
        );
    }

    #[test]
    fn test_add_clause_single_line_inserts() {
        let cmd = Command::AddClause {
            file: "Main.idr".to_string(),
            line: 4,
            function_name: "foo".to_string(),
        };
        assert_eq!(
            interpret(&cmd, &output("foo x y = ?rhs")),
            DisplayAction::Insert {
                to_insert: "foo x y = ?rhs".to_string(),
                line: 4
            }
        );
    }

    #[test]
    fn test_add_clause_multi_line_falls_back_to_text() {
        let cmd = Command::AddClause {
            file: "Main.idr".to_string(),
            line: 4,
            function_name: "foo".to_string(),
        };
        let err = "Main.idr:4:1:\nNo such function foo\nFurther info";
        assert_eq!(
            interpret(&cmd, &output(err)),
            DisplayAction::ShowText {
                text: err.to_string()
            }
        );
    }

    #[test]
    fn test_add_clause_empty_output_falls_back_to_text() {
        let cmd = Command::AddClause {
            file: "Main.idr".to_string(),
            line: 4,
            function_name: "foo".to_string(),
        };
        assert_eq!(
            interpret(&cmd, &output("")),
            DisplayAction::ShowText {
                text: String::new()
            }
        );
    }

    #[test]
    fn test_case_split_always_replaces() {
        let cmd = Command::CaseSplit {
            file: "Main.idr".to_string(),
            line: 5,
            case_target: "n".to_string(),
        };
        assert_eq!(
            interpret(&cmd, &output("foo Z = ?foo_rhs_1\nfoo (S k) = ?foo_rhs_2")),
            DisplayAction::Replace {
                to_replace: "foo Z = ?foo_rhs_1\nfoo (S k) = ?foo_rhs_2".to_string(),
                line: 5
            }
        );
    }

    #[test]
    fn test_case_split_replaces_even_with_error_output() {
        // The known sharp edge: error text still replaces the line.
        let cmd = Command::CaseSplit {
            file: "Main.idr".to_string(),
            line: 5,
            case_target: "n".to_string(),
        };
        assert_eq!(
            interpret(&cmd, &output("CaseSplit: failed")),
            DisplayAction::Replace {
                to_replace: "CaseSplit: failed".to_string(),
                line: 5
            }
        );
    }
}
