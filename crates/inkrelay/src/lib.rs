//! inkrelay - compiler invocation relay for embedded playgrounds.
//!
//! The relay accepts a multipart upload (source files plus a JSON
//! `command` field), stages the files into an ephemeral per-request
//! workspace, shells out to the Idris toolchain, and classifies its
//! textual output into a typed [`inkproto::DisplayAction`] the editor
//! applies verbatim.
//!
//! Request pipeline:
//!
//! ```text
//! multipart upload
//!   -> session::Session        (stage files, own the scratch dir)
//!   -> translate::translate    (Command -> Invocation, pure)
//!   -> invoke::Invoker         (subprocess, bounded wall clock)
//!   -> interpret::interpret    (raw stdout -> DisplayAction)
//! ```
//!
//! Failures before the subprocess (bad command, staging error) never
//! reach the invoker; toolchain diagnostics are payload, never errors.

pub mod interpret;
pub mod invoke;
pub mod session;
pub mod translate;
pub mod web;

pub use invoke::{IdrisInvoker, Invoker, ToolOutput};
pub use session::{Session, SessionStore};
pub use translate::{translate, Invocation, Mode};
pub use web::{router, AppState};
