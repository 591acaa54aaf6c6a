//! Display actions: the typed effects a relay response triggers in the
//! editor.

use serde::{Deserialize, Serialize};

/// The relay's answer, discriminated by the `displayAction` field.
///
/// The tag fully determines which fields are present; rendering is a
/// pure function of the tag. `line` is 1-based and names a line of the
/// active file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "displayAction", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum DisplayAction {
    /// Splice `to_insert` plus a newline in at the start of `line`.
    Insert { to_insert: String, line: u32 },
    /// Overwrite the full contents of `line` with `to_replace`.
    Replace { to_replace: String, line: u32 },
    /// Show `text` in the diagnostic panel. Empty text is rendered by
    /// the client as a fixed "no issues" message.
    ShowText { text: String },
}
