//! Application state management
//!
//! This module provides the central state for the Herald UI: the
//! command text, the current submission, the transcript/reply pair, and
//! the channel ends of the dispatcher and narrator pipelines.

use crate::dispatch::{
    DispatchCommand, DispatchEvent, SubmissionOutcome, EMPTY_COMMAND_HINT, GREETING,
    PROCESSING_NOTICE,
};
use crate::speech::{NarratorCommand, NarratorEvent};
use crate::HeraldError;
use crossbeam_channel::{Receiver, Sender};
use std::collections::VecDeque;
use tracing::debug;
use uuid::Uuid;

/// Submission state for the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight
    Idle,
    /// A submission is awaiting its outcome
    Busy,
}

/// Debug information displayed in the debug panel
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    /// Current dispatcher status
    pub dispatcher_status: String,
    /// Last narrator activity
    pub narrator_status: String,
    /// Recent log messages
    pub log_messages: VecDeque<String>,
}

impl DebugInfo {
    pub fn new() -> Self {
        Self {
            log_messages: VecDeque::with_capacity(100),
            ..Default::default()
        }
    }

    pub fn add_log(&mut self, message: String) {
        if self.log_messages.len() >= 100 {
            self.log_messages.pop_front();
        }
        self.log_messages
            .push_back(format!("{} {}", chrono::Local::now().format("%H:%M:%S"), message));
    }
}

/// Central application state
pub struct AppState {
    /// Current command text, updated on every keystroke
    pub command_text: String,

    /// Text attributed to what was heard; empty when there is none
    pub transcript: String,

    /// The assistant reply being displayed and narrated
    pub assistant_reply: String,

    /// Whether a submission is in flight
    pub submission: SubmissionState,

    /// Request ID of the submission whose outcome we will apply
    pub active_request: Option<Uuid>,

    /// Whether to show the debug panel
    pub show_debug_panel: bool,

    /// Debug information
    pub debug_info: DebugInfo,

    /// Last error message
    pub last_error: Option<String>,

    /// Channel to send dispatch commands
    pub dispatch_tx: Option<Sender<DispatchCommand>>,

    /// Channel to receive dispatch events
    pub dispatch_rx: Option<Receiver<DispatchEvent>>,

    /// Channel to send narrator commands
    pub narrator_tx: Option<Sender<NarratorCommand>>,

    /// Channel to receive narrator events
    pub narrator_rx: Option<Receiver<NarratorEvent>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create a new application state
    pub fn new() -> Self {
        Self {
            command_text: String::new(),
            transcript: String::new(),
            assistant_reply: GREETING.to_string(),
            submission: SubmissionState::Idle,
            active_request: None,
            show_debug_panel: false,
            debug_info: DebugInfo::new(),
            last_error: None,
            dispatch_tx: None,
            dispatch_rx: None,
            narrator_tx: None,
            narrator_rx: None,
        }
    }

    /// Attach the dispatcher pipeline channels
    pub fn attach_dispatch(&mut self, tx: Sender<DispatchCommand>, rx: Receiver<DispatchEvent>) {
        self.dispatch_tx = Some(tx);
        self.dispatch_rx = Some(rx);
    }

    /// Attach the narrator pipeline channels
    pub fn attach_narrator(&mut self, tx: Sender<NarratorCommand>, rx: Receiver<NarratorEvent>) {
        self.narrator_tx = Some(tx);
        self.narrator_rx = Some(rx);
    }

    pub fn is_busy(&self) -> bool {
        self.submission == SubmissionState::Busy
    }

    /// Commit the greeting so it is narrated like every later reply
    pub fn greet(&mut self) {
        self.commit_reply(GREETING.to_string());
    }

    /// Submit the current command text.
    ///
    /// With `use_mic` set, the backend listens on its own microphone and
    /// the text is forwarded as-is (it may be empty). Without it, an
    /// empty trimmed command short-circuits into the instructional hint
    /// and nothing is dispatched.
    pub fn submit(&mut self, use_mic: bool) {
        let trimmed = self.command_text.trim().to_string();

        if !use_mic && trimmed.is_empty() {
            self.commit_reply(EMPTY_COMMAND_HINT.to_string());
            return;
        }

        let request_id = Uuid::new_v4();
        self.active_request = Some(request_id);
        self.submission = SubmissionState::Busy;
        self.transcript.clear();
        self.debug_info.dispatcher_status = format!("Awaiting reply for {request_id}");
        self.commit_reply(PROCESSING_NOTICE.to_string());

        let Some(tx) = &self.dispatch_tx else {
            debug!("Dispatcher not attached; submission {} dropped", request_id);
            return;
        };

        if tx
            .send(DispatchCommand::Submit {
                text: trimmed,
                use_mic,
                request_id,
            })
            .is_err()
        {
            let err = HeraldError::Channel("dispatcher channel closed".to_string());
            self.submission = SubmissionState::Idle;
            self.active_request = None;
            self.last_error = Some(err.to_string());
            self.debug_info
                .add_log(format!("Failed to enqueue submission {request_id}: {err}"));
        }
    }

    /// Set the command text to a fixed shortcut literal and submit it
    pub fn submit_shortcut(&mut self, command: &str) {
        self.command_text = command.to_string();
        self.submit(false);
    }

    /// Commit a new assistant reply and hand it to the narrator.
    ///
    /// This is the single place the reply is written; every call
    /// forwards exactly one `Speak` so narration stays in lockstep with
    /// the display.
    pub fn commit_reply(&mut self, text: String) {
        self.assistant_reply = text;

        if let Some(tx) = &self.narrator_tx {
            let _ = tx.send(NarratorCommand::Speak {
                text: self.assistant_reply.clone(),
            });
        }
    }

    /// Process incoming events from the pipeline channels
    pub fn poll_events(&mut self) {
        // Drain dispatch events first, then apply; applying mutates self
        let dispatch_events: Vec<DispatchEvent> = if let Some(rx) = &self.dispatch_rx {
            let mut events = Vec::new();
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
            events
        } else {
            Vec::new()
        };

        for event in dispatch_events {
            match event {
                DispatchEvent::Completed {
                    outcome,
                    request_id,
                } => self.apply_resolution(outcome, request_id),
                DispatchEvent::Error { error } => {
                    self.last_error = Some(error.clone());
                    self.debug_info.add_log(format!("Dispatcher error: {error}"));
                }
                DispatchEvent::Shutdown => {
                    self.debug_info.add_log("Dispatcher pipeline shut down".to_string());
                }
            }
        }

        let narrator_events: Vec<NarratorEvent> = if let Some(rx) = &self.narrator_rx {
            let mut events = Vec::new();
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
            events
        } else {
            Vec::new()
        };

        for event in narrator_events {
            match event {
                NarratorEvent::Spoken { text } => {
                    self.debug_info.narrator_status = format!("Spoke: {text}");
                }
                NarratorEvent::Error { error } => {
                    self.debug_info.add_log(format!("Narrator error: {error}"));
                }
                NarratorEvent::Shutdown => {
                    self.debug_info.add_log("Narrator pipeline shut down".to_string());
                }
            }
        }
    }

    fn apply_resolution(&mut self, outcome: SubmissionOutcome, request_id: Uuid) {
        if self.active_request != Some(request_id) {
            debug!("Discarding stale result for request {}", request_id);
            self.debug_info
                .add_log(format!("Discarded stale result for {request_id}"));
            return;
        }

        self.active_request = None;
        self.submission = SubmissionState::Idle;
        self.debug_info.dispatcher_status = "Idle".to_string();
        self.transcript = outcome.transcript;
        self.commit_reply(outcome.reply);
    }
}
