//! Backend wire types and submission outcome mapping
//!
//! One HTTP call per submission, no retry, no timeout. Every result,
//! including the failures, is flattened into a [`SubmissionOutcome`] so
//! the UI has a single shape to apply.

use crate::config::BackendConfig;
use crate::{HeraldError, Result};
use serde::{Deserialize, Serialize};

/// Greeting committed (and narrated) when the screen first appears
pub const GREETING: &str = "Hello, I am your voice assistant. How may I help you?";

/// Reply used when a typed submission is empty after trimming
pub const EMPTY_COMMAND_HINT: &str =
    "Please type a command (e.g., time, date, play <song>, wikipedia <topic>).";

/// Placeholder reply shown while a submission is in flight
pub const PROCESSING_NOTICE: &str = "Processing...";

/// Reply used when a success body carries no `response` field
pub const FALLBACK_REPLY: &str = "No response";

/// Transcript used for microphone submissions when the backend does not
/// report what it heard
pub const MIC_TRANSCRIPT_PLACEHOLDER: &str = "(heard from mic)";

/// Request body posted to the backend
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest {
    /// Trimmed command text
    pub command: String,

    /// Whether the backend should capture the command from its microphone
    pub use_mic: bool,
}

/// Success response body from the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandReply {
    /// The assistant's answer
    pub response: Option<String>,

    /// What the backend recognized, when it reports it
    pub heard: Option<String>,
}

/// Display outcome of one submission: the reply to narrate and the
/// transcript to attribute to the user. Error outcomes carry an empty
/// transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub reply: String,
    pub transcript: String,
}

impl SubmissionOutcome {
    /// Map a backend result into display text.
    ///
    /// Total over the error taxonomy: success (with graceful fallbacks
    /// for absent fields), HTTP status errors, and transport failures.
    pub fn resolve(result: Result<CommandReply>, submitted: &str, use_mic: bool) -> Self {
        match result {
            Ok(reply) => Self::from_reply(reply, submitted, use_mic),
            Err(HeraldError::BackendStatus(status)) => Self {
                reply: format!("Backend responded with status: {status}"),
                transcript: String::new(),
            },
            Err(HeraldError::Network(message)) => Self {
                reply: format!(
                    "Cannot reach backend. Make sure the server is running. Error: {message}"
                ),
                transcript: String::new(),
            },
            Err(other) => Self {
                reply: other.to_string(),
                transcript: String::new(),
            },
        }
    }

    fn from_reply(reply: CommandReply, submitted: &str, use_mic: bool) -> Self {
        let transcript = reply.heard.unwrap_or_else(|| {
            if use_mic {
                MIC_TRANSCRIPT_PLACEHOLDER.to_string()
            } else {
                submitted.to_string()
            }
        });

        Self {
            reply: reply.response.unwrap_or_else(|| FALLBACK_REPLY.to_string()),
            transcript,
        }
    }
}

/// HTTP client for the command endpoint
pub struct BackendClient {
    http: reqwest::Client,
    endpoint: String,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint,
        }
    }

    /// Post one submission and decode the reply.
    ///
    /// A non-2xx status maps to [`HeraldError::BackendStatus`]; any
    /// transmission or body-decode failure maps to
    /// [`HeraldError::Network`].
    pub async fn send(&self, request: &CommandRequest) -> Result<CommandReply> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| HeraldError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HeraldError::BackendStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| HeraldError::Network(e.to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| HeraldError::Network(format!("invalid response body: {e}")))
    }
}
