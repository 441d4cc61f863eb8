//! QAgent voice command interface
//!
//! Turns finalized spoken utterances into calls against the QAgent
//! orchestrator API and answers with text ready for speech synthesis.
//! Also computes the aggregate metrics shown on the QAgent dashboard.

pub mod agent;
pub mod dashboard;
pub mod integration;
pub mod intent;
pub mod messages;
pub mod orchestrator;

pub use agent::VoiceAgent;
pub use integration::AgentConfig;
pub use intent::{classify, Intent};

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum QAgentError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Orchestrator returned unexpected status {status}")]
    Protocol { status: u16 },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for QAgentError {
    fn from(e: std::io::Error) -> Self {
        QAgentError::IOError(e.to_string())
    }
}

impl From<reqwest::Error> for QAgentError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            QAgentError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            QAgentError::Protocol {
                status: status.as_u16(),
            }
        } else {
            QAgentError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for QAgentError {
    fn from(e: serde_json::Error) -> Self {
        QAgentError::Decode(e.to_string())
    }
}

impl QAgentError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Orchestrator-side failures end in a degraded response, never a crash
            QAgentError::Transport(_) => true,
            QAgentError::Protocol { .. } => true,
            QAgentError::Decode(_) => true,
            // These need the operator to fix the environment
            QAgentError::ConfigError(_) => false,
            QAgentError::ChannelError(_) => false,
            QAgentError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            QAgentError::Transport(_) => {
                "Could not reach the orchestrator. Please check that it is running.".to_string()
            }
            QAgentError::Protocol { .. } => {
                "The orchestrator rejected the request. Please check the dashboard.".to_string()
            }
            QAgentError::Decode(_) => {
                "The orchestrator sent a response I could not read.".to_string()
            }
            QAgentError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            QAgentError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            QAgentError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QAgentError>;
