//! Configuration for the backend endpoint and the narrator
//!
//! Provides centralized configuration for all components. Defaults
//! reproduce the stock behavior; nothing is read from files or the
//! environment.

use crate::speech::narrator::NarratorConfig;
use crate::{HeraldError, Result};

/// Default command endpoint of the local assistant backend
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/voice-command";

/// Configuration for the command dispatcher
#[derive(Clone, Debug)]
pub struct BackendConfig {
    /// URL the dispatcher posts submissions to
    pub endpoint: String,

    /// Maximum queue size for pending dispatch commands and events
    pub queue_size: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            queue_size: 100,
        }
    }
}

impl BackendConfig {
    /// Create a config pointing at a custom endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the channel queue size
    pub fn with_queue_size(mut self, queue_size: usize) -> Self {
        self.queue_size = queue_size;
        self
    }
}

/// Configuration for the complete application
#[derive(Clone, Debug, Default)]
pub struct HeraldConfig {
    /// Command dispatcher configuration
    pub backend: BackendConfig,

    /// Narrator configuration
    pub narrator: NarratorConfig,
}

impl HeraldConfig {
    /// Point the dispatcher at a custom endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.backend.endpoint = endpoint.into();
        self
    }

    /// Replace the narrator configuration
    pub fn with_narrator(mut self, narrator: NarratorConfig) -> Self {
        self.narrator = narrator;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.backend.endpoint.is_empty() {
            return Err(HeraldError::Config("backend endpoint is required".into()));
        }

        if !self.backend.endpoint.starts_with("http://")
            && !self.backend.endpoint.starts_with("https://")
        {
            return Err(HeraldError::Config(format!(
                "backend endpoint must start with http:// or https://: {}",
                self.backend.endpoint
            )));
        }

        if self.backend.queue_size == 0 {
            return Err(HeraldError::Config("queue size must be non-zero".into()));
        }

        if self.narrator.rate <= 0.0 || self.narrator.pitch <= 0.0 {
            return Err(HeraldError::Config(
                "narrator rate and pitch must be positive".into(),
            ));
        }

        Ok(())
    }
}
