//! Typed playground commands, discriminated by the `action` field.

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// A request from the editor, parsed from the `command` multipart field.
///
/// All actions name the active source file by its workspace-relative
/// path. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    /// Batch typecheck of the whole file.
    Check { file: String },
    /// Type of the expression under the cursor.
    Typeof { file: String, expr: String },
    /// Generate an initial clause for a declared function.
    AddClause {
        file: String,
        line: u32,
        function_name: String,
    },
    /// Case split on a pattern variable.
    CaseSplit {
        file: String,
        line: u32,
        case_target: String,
    },
}

impl Command {
    /// Parse and validate a command from its JSON encoding.
    ///
    /// This is the single validation boundary: an unknown action, a
    /// missing field, an empty string field, or a zero line number all
    /// reject the request with [`RelayError::UnrecognizedCommand`].
    pub fn parse(json: &str) -> Result<Self, RelayError> {
        let command: Command = serde_json::from_str(json)
            .map_err(|e| RelayError::UnrecognizedCommand(e.to_string()))?;
        command.validate()?;
        Ok(command)
    }

    fn validate(&self) -> Result<(), RelayError> {
        let reject = |what: &str| Err(RelayError::UnrecognizedCommand(what.to_string()));
        if self.file().is_empty() {
            return reject("empty file path");
        }
        match self {
            Command::Check { .. } => Ok(()),
            Command::Typeof { expr, .. } => {
                if expr.is_empty() {
                    reject("typeof requires a non-empty expr")
                } else {
                    Ok(())
                }
            }
            Command::AddClause {
                line,
                function_name,
                ..
            } => {
                if *line == 0 {
                    reject("addClause requires a positive line")
                } else if function_name.is_empty() {
                    reject("addClause requires a non-empty functionName")
                } else {
                    Ok(())
                }
            }
            Command::CaseSplit {
                line, case_target, ..
            } => {
                if *line == 0 {
                    reject("caseSplit requires a positive line")
                } else if case_target.is_empty() {
                    reject("caseSplit requires a non-empty caseTarget")
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Workspace-relative path of the active source file.
    pub fn file(&self) -> &str {
        match self {
            Command::Check { file }
            | Command::Typeof { file, .. }
            | Command::AddClause { file, .. }
            | Command::CaseSplit { file, .. } => file,
        }
    }

    /// Target line for actions that edit the buffer, if any.
    pub fn line(&self) -> Option<u32> {
        match self {
            Command::Check { .. } | Command::Typeof { .. } => None,
            Command::AddClause { line, .. } | Command::CaseSplit { line, .. } => Some(*line),
        }
    }

    /// Wire name of the action, for logging.
    pub fn action_name(&self) -> &'static str {
        match self {
            Command::Check { .. } => "check",
            Command::Typeof { .. } => "typeof",
            Command::AddClause { .. } => "addClause",
            Command::CaseSplit { .. } => "caseSplit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cmd = Command::parse(r#"{"action":"check","file":"Main.idr"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Check {
                file: "Main.idr".to_string()
            }
        );
        assert_eq!(cmd.action_name(), "check");
        assert_eq!(cmd.line(), None);
    }

    #[test]
    fn test_parse_typeof() {
        let cmd =
            Command::parse(r#"{"action":"typeof","file":"Main.idr","expr":"plus"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Typeof {
                file: "Main.idr".to_string(),
                expr: "plus".to_string()
            }
        );
    }

    #[test]
    fn test_parse_add_clause() {
        let cmd = Command::parse(
            r#"{"action":"addClause","file":"Main.idr","line":4,"functionName":"plus"}"#,
        )
        .unwrap();
        assert_eq!(cmd.line(), Some(4));
        assert_eq!(cmd.file(), "Main.idr");
    }

    #[test]
    fn test_parse_case_split() {
        let cmd = Command::parse(
            r#"{"action":"caseSplit","file":"Main.idr","line":5,"caseTarget":"n"}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Command::CaseSplit {
                file: "Main.idr".to_string(),
                line: 5,
                case_target: "n".to_string()
            }
        );
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        // typeof without expr
        let err = Command::parse(r#"{"action":"typeof","file":"Main.idr"}"#).unwrap_err();
        assert!(matches!(err, RelayError::UnrecognizedCommand(_)));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let err = Command::parse(r#"{"action":"proofSearch","file":"Main.idr"}"#).unwrap_err();
        assert!(matches!(err, RelayError::UnrecognizedCommand(_)));
    }

    #[test]
    fn test_zero_line_is_rejected() {
        let err = Command::parse(
            r#"{"action":"caseSplit","file":"Main.idr","line":0,"caseTarget":"n"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RelayError::UnrecognizedCommand(_)));
    }

    #[test]
    fn test_empty_expr_is_rejected() {
        let err =
            Command::parse(r#"{"action":"typeof","file":"Main.idr","expr":""}"#).unwrap_err();
        assert!(matches!(err, RelayError::UnrecognizedCommand(_)));
    }

    #[test]
    fn test_wire_roundtrip_preserves_tag() {
        let cmd = Command::AddClause {
            file: "Main.idr".to_string(),
            line: 7,
            function_name: "foo".to_string(),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains(r#""action":"addClause""#));
        assert!(json.contains(r#""functionName":"foo""#));
        assert_eq!(Command::parse(&json).unwrap(), cmd);
    }
}
