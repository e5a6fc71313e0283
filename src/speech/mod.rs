//! Speech output for assistant replies
//!
//! This module provides the narrator pipeline and the platform speech
//! backend it drives.

pub mod narrator;

// Re-export commonly used types
pub use narrator::{
    NarratorCommand, NarratorConfig, NarratorEvent, NarratorPipeline, SpeechBackend, SystemSpeech,
    Utterance,
};
