//! quill - editor-side dispatcher for the inkwell playground relay.
//!
//! Mirrors what the in-browser editor integration does: read the
//! buffer and cursor, pull the identifier under the cursor, build a
//! typed command, upload the buffer plus command to the relay, and
//! apply the typed display action that comes back (splice a line,
//! overwrite a line, or show diagnostic text in the panel).
//!
//! The pieces are separable on purpose: [`buffer`] is the editor
//! model, [`dispatch`] is the pure command/response logic, and
//! [`client`] is the wire. The `quill` binary glues them together for
//! terminal use against a live relay.

pub mod buffer;
pub mod client;
pub mod dispatch;

pub use buffer::{Buffer, Cursor};
pub use client::{ClientError, RelayClient};
pub use dispatch::{apply, apply_failure, build_command, ActionKind, Panel};
