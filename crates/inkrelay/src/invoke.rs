//! Toolchain invocation: run the compiler as a bounded subprocess.
//!
//! The invoker is a trait so the web layer can be exercised with a spy
//! in tests; `IdrisInvoker` is the real thing. Diagnostics from the
//! toolchain (non-zero exit, error text) are output the user needs to
//! see, so they come back as [`ToolOutput`], never as errors. Only
//! failing to launch the process, or blowing the wall-clock bound, is
//! a hard failure.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::time::timeout;
use tracing::debug;

use inkproto::RelayError;

use crate::translate::{Invocation, Mode};

/// Raw result of one toolchain run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Trimmed stdout. Falls back to trimmed stderr when stdout is
    /// empty, so diagnostics the toolchain sends there still reach the
    /// user.
    pub stdout: String,
    pub exit_code: i32,
}

/// Seam between the web handler and the subprocess.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn run(&self, invocation: &Invocation, workspace: &Path)
        -> Result<ToolOutput, RelayError>;
}

/// Runs the real Idris toolchain against a workspace.
pub struct IdrisInvoker {
    program: std::path::PathBuf,
    timeout: Duration,
}

impl IdrisInvoker {
    pub fn new(program: impl Into<std::path::PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Invoker for IdrisInvoker {
    async fn run(
        &self,
        invocation: &Invocation,
        workspace: &Path,
    ) -> Result<ToolOutput, RelayError> {
        // The toolchain's interactive mode keeps a per-user cache under
        // $HOME. Pointing HOME inside the workspace gives every request
        // a private cache path, deleted with the workspace, so no state
        // leaks between requests and concurrent requests never share a
        // cache.
        let cache = workspace.join("cache");
        tokio::fs::create_dir_all(&cache).await?;

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.current_dir(workspace)
            .env("HOME", &cache)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let instruction = match &invocation.mode {
            Mode::Check => {
                cmd.arg("--check").arg(&invocation.file);
                cmd.stdin(Stdio::null());
                None
            }
            Mode::Repl { instruction } => {
                cmd.arg("--nocolour").arg("--quiet").arg(&invocation.file);
                cmd.stdin(Stdio::piped());
                Some(instruction.clone())
            }
        };

        let mut child = cmd.spawn().map_err(RelayError::ProcessLaunchFailure)?;

        if let Some(instruction) = instruction {
            if let Some(mut stdin) = child.stdin.take() {
                // Closing stdin after the single instruction ends the
                // interactive session.
                stdin
                    .write_all(format!("{instruction}\n").as_bytes())
                    .await
                    .map_err(RelayError::ProcessLaunchFailure)?;
            }
        }

        // On timeout the output future is dropped, and kill_on_drop
        // reaps the child.
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(RelayError::ProcessLaunchFailure)?,
            Err(_) => {
                return Err(RelayError::Timeout {
                    secs: self.timeout.as_secs(),
                })
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        debug!(exit_code, stdout_len = stdout.len(), "toolchain finished");

        Ok(ToolOutput {
            stdout: if stdout.is_empty() { stderr } else { stdout },
            exit_code,
        })
    }
}
