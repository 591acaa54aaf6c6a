//! inkproto - Protocol types for the inkwell playground relay
//!
//! This crate defines the types exchanged between the editor-side
//! dispatcher (quill) and the compiler relay (inkrelay). A request is a
//! multipart upload: one or more source files plus a JSON-encoded
//! [`Command`] field. The response is a JSON-encoded [`DisplayAction`],
//! or a plain error string when the relay rejects the request before it
//! reaches the interpreter.
//!
//! ## Command dispatch
//!
//! The `action` field of the command JSON discriminates a closed enum:
//! `check`, `typeof`, `addClause`, `caseSplit`. Each action carries
//! exactly the fields it needs; deserialization plus a single boundary
//! validation (`Command::parse`) either yields a fully-typed command or
//! rejects the request before any subprocess is spawned. Adding an
//! action is a compile-time-checked change in the relay's translator
//! and interpreter.
//!
//! ## Display actions
//!
//! The relay classifies toolchain output into one of three effects the
//! editor applies verbatim: insert a line, replace a line, or show
//! diagnostic text. The tag fully determines which fields are present,
//! and the editor's behavior is a pure function of the tag.

pub mod action;
pub mod command;
pub mod error;

pub use action::DisplayAction;
pub use command::Command;
pub use error::RelayError;

/// Default name for a single-file playground session. The dispatcher
/// uploads the edited buffer under this name unless the code block
/// records its own path.
pub const DEFAULT_FILE: &str = "Main.idr";
