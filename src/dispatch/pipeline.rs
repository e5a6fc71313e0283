//! Command dispatcher pipeline
//!
//! Provides a channel-based interface around the backend client: one
//! worker thread owns the HTTP client and a tokio runtime, receives
//! submissions, and emits exactly one completion event per submission.

use crate::config::BackendConfig;
use crate::dispatch::client::{BackendClient, CommandRequest, SubmissionOutcome};
use crate::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Commands that can be sent to the dispatcher pipeline
#[derive(Debug, Clone)]
pub enum DispatchCommand {
    /// Submit a command to the backend
    Submit {
        /// Trimmed command text
        text: String,
        /// Whether the backend should listen on its microphone instead
        use_mic: bool,
        /// Unique request ID for tracking
        request_id: Uuid,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the dispatcher pipeline
#[derive(Debug, Clone)]
pub enum DispatchEvent {
    /// A submission resolved; emitted on every path, success or failure
    Completed {
        /// Display outcome for the UI to apply
        outcome: SubmissionOutcome,
        /// Request ID this outcome belongs to
        request_id: Uuid,
    },

    /// The worker itself failed (not tied to a submission)
    Error {
        /// Error message
        error: String,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// Dispatcher pipeline with channel-based communication
pub struct DispatchPipeline {
    config: BackendConfig,
    command_tx: Sender<DispatchCommand>,
    command_rx: Receiver<DispatchCommand>,
    event_tx: Sender<DispatchEvent>,
    event_rx: Receiver<DispatchEvent>,
}

impl DispatchPipeline {
    /// Create a new dispatcher pipeline
    pub fn new(config: BackendConfig) -> Self {
        let (command_tx, command_rx) = bounded(config.queue_size);
        let (event_tx, event_rx) = bounded(config.queue_size);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<DispatchCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<DispatchEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread
    ///
    /// Returns the JoinHandle for the worker thread.
    pub fn start_worker(self) -> Result<thread::JoinHandle<()>> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        let handle = thread::spawn(move || {
            info!("Dispatcher worker starting for {}", config.endpoint);

            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(DispatchEvent::Error {
                        error: format!("Runtime creation failed: {e}"),
                    });
                    let _ = event_tx.send(DispatchEvent::Shutdown);
                    return;
                }
            };

            let client = BackendClient::new(config);

            info!("Dispatcher worker ready");

            loop {
                match command_rx.recv() {
                    Ok(DispatchCommand::Submit {
                        text,
                        use_mic,
                        request_id,
                    }) => {
                        debug!("Submitting request {}: \"{}\"", request_id, text);

                        let request = CommandRequest {
                            command: text.clone(),
                            use_mic,
                        };

                        let result = runtime.block_on(client.send(&request));
                        let outcome = SubmissionOutcome::resolve(result, &text, use_mic);

                        debug!("Request {} resolved: \"{}\"", request_id, outcome.reply);

                        let _ = event_tx.send(DispatchEvent::Completed {
                            outcome,
                            request_id,
                        });
                    }

                    Ok(DispatchCommand::Shutdown) => {
                        info!("Dispatcher worker shutting down");
                        let _ = event_tx.send(DispatchEvent::Shutdown);
                        break;
                    }

                    Err(e) => {
                        error!("Command channel error: {}", e);
                        break;
                    }
                }
            }

            info!("Dispatcher worker stopped");
        });

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_creation() {
        let pipeline = DispatchPipeline::new(BackendConfig::default());

        let _cmd_tx = pipeline.command_sender();
        let _event_rx = pipeline.event_receiver();
    }

    #[test]
    fn test_queue_size_bounds_channels() {
        let pipeline = DispatchPipeline::new(BackendConfig::default().with_queue_size(4));
        assert_eq!(pipeline.command_tx.capacity(), Some(4));
    }
}
