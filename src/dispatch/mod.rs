//! Command dispatch to the assistant backend
//!
//! This module provides:
//! - Wire types and outcome mapping for the `/voice-command` endpoint
//! - A worker pipeline that issues one HTTP POST per submission

pub mod client;
pub mod pipeline;

pub use client::{
    BackendClient, CommandReply, CommandRequest, SubmissionOutcome, EMPTY_COMMAND_HINT,
    FALLBACK_REPLY, GREETING, MIC_TRANSCRIPT_PLACEHOLDER, PROCESSING_NOTICE,
};
pub use pipeline::{DispatchCommand, DispatchEvent, DispatchPipeline};
