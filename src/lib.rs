pub mod config;
pub mod dispatch;
pub mod speech;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HeraldError {
    #[error("backend returned status {0}")]
    BackendStatus(u16),

    #[error("network failure: {0}")]
    Network(String),

    #[error("speech synthesis error: {0}")]
    Speech(String),

    #[error("channel error: {0}")]
    Channel(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HeraldError>;
