//! Voice command agent and its spoken replies

pub mod prompts;
pub mod responses;
mod voice;

pub use prompts::SYSTEM_PROMPT;
pub use voice::VoiceAgent;
