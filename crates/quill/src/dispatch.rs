//! Pure dispatch logic: editor state -> command, display action ->
//! editor mutation.
//!
//! No networking here; `client` owns the wire. Keeping this pure makes
//! the abort-without-token and last-response-wins behavior trivially
//! testable.

use inkproto::{Command, DisplayAction};

use crate::buffer::Buffer;

/// Fixed panel text when a check comes back clean.
pub const NO_ISSUES: &str = "No type errors.";

/// Panel text while a request is outstanding.
pub const BUSY: &str = "Typechecking...";

/// The playground actions a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Check,
    Typeof,
    AddClause,
    CaseSplit,
}

/// The diagnostic panel next to the snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Hidden,
    Busy,
    Text(String),
}

/// Build the command for an action from the current editor state.
///
/// Actions that need an identifier take it from the cursor; with no
/// identifier touching the cursor they return `None` and the caller
/// must abort without issuing a request. Line numbers come from the
/// cursor line.
pub fn build_command(kind: ActionKind, buffer: &Buffer, file: &str) -> Option<Command> {
    let file = file.to_string();
    match kind {
        ActionKind::Check => Some(Command::Check { file }),
        ActionKind::Typeof => Some(Command::Typeof {
            file,
            expr: buffer.token_at_cursor()?,
        }),
        ActionKind::AddClause => Some(Command::AddClause {
            file,
            line: buffer.cursor.line,
            function_name: buffer.token_at_cursor()?,
        }),
        ActionKind::CaseSplit => Some(Command::CaseSplit {
            file,
            line: buffer.cursor.line,
            case_target: buffer.token_at_cursor()?,
        }),
    }
}

/// Apply a relay response to the editor. Rendering is a pure function
/// of the action's tag: edits hide the panel, text shows it.
pub fn apply(buffer: &mut Buffer, panel: &mut Panel, action: &DisplayAction) {
    match action {
        DisplayAction::Insert { to_insert, line } => {
            buffer.insert_line_at(*line, to_insert);
            *panel = Panel::Hidden;
        }
        DisplayAction::Replace { to_replace, line } => {
            buffer.replace_line(*line, to_replace);
            *panel = Panel::Hidden;
        }
        DisplayAction::ShowText { text } => {
            *panel = if text.is_empty() {
                Panel::Text(NO_ISSUES.to_string())
            } else {
                Panel::Text(text.clone())
            };
        }
    }
}

/// Render a communication failure (rejected request, dropped
/// connection, lost timeout race) in the panel. Never retried.
pub fn apply_failure(panel: &mut Panel, detail: &str) {
    *panel = Panel::Text(format!("Playground communication: {detail}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet() -> Buffer {
        Buffer::from_text("plus : Nat -> Nat -> Nat\nplus n m = ?plus_rhs")
    }

    #[test]
    fn test_check_needs_no_token() {
        let buffer = snippet();
        let cmd = build_command(ActionKind::Check, &buffer, "Main.idr").unwrap();
        assert_eq!(
            cmd,
            Command::Check {
                file: "Main.idr".to_string()
            }
        );
    }

    #[test]
    fn test_typeof_takes_token_from_cursor() {
        let mut buffer = snippet();
        buffer.set_cursor(2, 1); // inside "plus"
        let cmd = build_command(ActionKind::Typeof, &buffer, "Main.idr").unwrap();
        assert_eq!(
            cmd,
            Command::Typeof {
                file: "Main.idr".to_string(),
                expr: "plus".to_string()
            }
        );
    }

    #[test]
    fn test_case_split_takes_line_and_target_from_cursor() {
        let mut buffer = snippet();
        buffer.set_cursor(2, 6); // touching "n"
        let cmd = build_command(ActionKind::CaseSplit, &buffer, "Main.idr").unwrap();
        assert_eq!(
            cmd,
            Command::CaseSplit {
                file: "Main.idr".to_string(),
                line: 2,
                case_target: "n".to_string()
            }
        );
    }

    #[test]
    fn test_no_token_aborts_action() {
        let mut buffer = Buffer::from_text("  foo + bar");
        buffer.set_cursor(1, 0); // leading whitespace, nothing adjacent
        assert_eq!(build_command(ActionKind::Typeof, &buffer, "Main.idr"), None);
        assert_eq!(
            build_command(ActionKind::AddClause, &buffer, "Main.idr"),
            None
        );
        assert_eq!(
            build_command(ActionKind::CaseSplit, &buffer, "Main.idr"),
            None
        );
    }

    #[test]
    fn test_insert_hides_panel_and_splices() {
        let mut buffer = snippet();
        let mut panel = Panel::Busy;
        apply(
            &mut buffer,
            &mut panel,
            &DisplayAction::Insert {
                to_insert: "plus x y = ?rhs".to_string(),
                line: 2,
            },
        );
        assert_eq!(panel, Panel::Hidden);
        assert_eq!(buffer.line(2), Some("plus x y = ?rhs"));
        assert_eq!(buffer.line(3), Some("plus n m = ?plus_rhs"));
    }

    #[test]
    fn test_replace_overwrites_line() {
        let mut buffer = snippet();
        let mut panel = Panel::Busy;
        apply(
            &mut buffer,
            &mut panel,
            &DisplayAction::Replace {
                to_replace: "plus Z m = ?rhs_1".to_string(),
                line: 2,
            },
        );
        assert_eq!(panel, Panel::Hidden);
        assert_eq!(buffer.line(2), Some("plus Z m = ?rhs_1"));
        assert_eq!(buffer.line_count(), 2);
    }

    #[test]
    fn test_showtext_opens_panel() {
        let mut buffer = snippet();
        let mut panel = Panel::Hidden;
        apply(
            &mut buffer,
            &mut panel,
            &DisplayAction::ShowText {
                text: "Type mismatch".to_string(),
            },
        );
        assert_eq!(panel, Panel::Text("Type mismatch".to_string()));
    }

    #[test]
    fn test_empty_showtext_renders_no_issues() {
        let mut buffer = snippet();
        let mut panel = Panel::Busy;
        apply(
            &mut buffer,
            &mut panel,
            &DisplayAction::ShowText {
                text: String::new(),
            },
        );
        assert_eq!(panel, Panel::Text(NO_ISSUES.to_string()));
    }

    #[test]
    fn test_failure_renders_communication_error() {
        let mut panel = Panel::Busy;
        apply_failure(&mut panel, "request timed out after 6s");
        assert_eq!(
            panel,
            Panel::Text("Playground communication: request timed out after 6s".to_string())
        );
    }
}
