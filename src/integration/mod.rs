//! Pipeline integration
//!
//! Configuration and the command handler that sits between the external
//! transcription pipeline and speech synthesis.

mod config;
mod handler;

pub use config::{
    AgentConfig, DEFAULT_ORCHESTRATOR_URL, ORCHESTRATOR_URL_ENV, REQUEST_TIMEOUT_ENV,
};
pub use handler::{CommandHandler, CommandHandlerCommand, CommandHandlerEvent, CommandWorker};
