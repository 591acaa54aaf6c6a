//! HTTP client for the relay.
//!
//! One request shape: a multipart POST with the buffer as a `files[]`
//! part (filename carries the workspace-relative path) and the JSON
//! command as a text field. The call races against a fixed timeout;
//! losing the race is a failure, and nothing is retried automatically.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use inkproto::{Command, DisplayAction};

/// Client-side failures. All of them end up in the diagnostic panel as
/// a communication error.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),

    /// The relay answered with a plain error string instead of a
    /// display action.
    #[error("{0}")]
    Relay(String),
}

/// Handle to one relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl RelayClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }

    /// Upload the buffer and command, and return the typed display
    /// action.
    pub async fn submit(
        &self,
        file_name: &str,
        source: &str,
        command: &Command,
    ) -> Result<DisplayAction, ClientError> {
        let command_json = serde_json::to_string(command)?;
        debug!(action = command.action_name(), file = file_name, "submitting");

        let part = reqwest::multipart::Part::bytes(source.as_bytes().to_vec())
            .file_name(file_name.to_string())
            .mime_str("text/plain")?;
        let form = reqwest::multipart::Form::new()
            .part("files[]", part)
            .text("command", command_json);

        let send = self.http.post(&self.url).multipart(form).send();
        let response = match tokio::time::timeout(self.timeout, send).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(ClientError::Timeout {
                    secs: self.timeout.as_secs(),
                })
            }
        };

        let body = response.text().await?;
        match serde_json::from_str::<DisplayAction>(&body) {
            Ok(action) => Ok(action),
            // Plain error string from the relay; show it, don't parse it.
            Err(_) => Err(ClientError::Relay(body)),
        }
    }
}
