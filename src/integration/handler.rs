//! Command handler for finalized utterances
//!
//! The speech pipeline hands finalized utterances to the handler; a worker
//! thread answers them one at a time, in arrival order, and emits each spoken
//! reply as an event for speech synthesis.

use crate::agent::VoiceAgent;
use crate::intent::classify;
use crate::messages::{Exchange, ExchangeLog};
use crate::{QAgentError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error, info};

/// Commands that can be sent to the command handler
#[derive(Debug)]
pub enum CommandHandlerCommand {
    /// Answer a finalized utterance
    ProcessUtterance(String),
    /// Shutdown the handler
    Shutdown,
}

/// Events emitted by the command handler
#[derive(Clone, Debug)]
pub enum CommandHandlerEvent {
    /// Reply ready for speech synthesis
    ResponseReady(Exchange),
    /// Handler has shut down
    Shutdown,
}

/// Front end of the command handler
pub struct CommandHandler {
    command_tx: Sender<CommandHandlerCommand>,
    event_rx: Receiver<CommandHandlerEvent>,
    log: ExchangeLog,
}

impl CommandHandler {
    /// Create a new command handler
    ///
    /// Returns both the handler (for sending commands and receiving events)
    /// and the worker (to be started in a separate thread).
    pub fn new(agent: VoiceAgent) -> (Self, CommandWorker) {
        Self::with_log(agent, ExchangeLog::new())
    }

    /// Create a handler that records exchanges into an existing log
    pub fn with_log(agent: VoiceAgent, log: ExchangeLog) -> (Self, CommandWorker) {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(100);

        let handler = Self {
            command_tx,
            event_rx,
            log: log.clone(),
        };

        let worker = CommandWorker {
            agent,
            command_rx,
            event_tx,
            log,
        };

        (handler, worker)
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<CommandHandlerCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<CommandHandlerEvent> {
        self.event_rx.clone()
    }

    /// History of answered utterances
    pub fn log(&self) -> &ExchangeLog {
        &self.log
    }

    /// Queue a finalized utterance
    pub fn process_utterance(&self, utterance: impl Into<String>) -> Result<()> {
        self.command_tx
            .send(CommandHandlerCommand::ProcessUtterance(utterance.into()))
            .map_err(|e| QAgentError::ChannelError(format!("Failed to send utterance: {}", e)))
    }

    /// Request shutdown
    pub fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(CommandHandlerCommand::Shutdown)
            .map_err(|e| QAgentError::ChannelError(format!("Failed to send shutdown: {}", e)))
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv_event(&self) -> Option<CommandHandlerEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receive an event (blocking)
    pub fn recv_event(&self) -> Result<CommandHandlerEvent> {
        self.event_rx
            .recv()
            .map_err(|e| QAgentError::ChannelError(format!("Failed to receive event: {}", e)))
    }
}

/// Worker that answers utterances in a dedicated thread
pub struct CommandWorker {
    agent: VoiceAgent,
    command_rx: Receiver<CommandHandlerCommand>,
    event_tx: Sender<CommandHandlerEvent>,
    log: ExchangeLog,
}

impl CommandWorker {
    /// Start the worker thread
    pub fn start(self) -> JoinHandle<()> {
        thread::spawn(move || {
            if let Err(e) = self.run() {
                error!("Command handler worker error: {}", e);
            }
        })
    }

    /// Main worker loop
    fn run(self) -> Result<()> {
        info!("Command handler worker starting");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        loop {
            match self.command_rx.recv() {
                Ok(CommandHandlerCommand::ProcessUtterance(text)) => {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        debug!("Blank utterance received, answering with help");
                    }

                    let started = Instant::now();
                    let intent = classify(trimmed);
                    debug!("Utterance '{}' classified as {}", trimmed, intent);

                    let response = runtime.block_on(self.agent.dispatch(intent));
                    let elapsed_ms =
                        u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let exchange = Exchange::new(trimmed, intent, response)
                        .with_processing_time_ms(elapsed_ms);

                    info!("Answered {} in {}ms", intent, exchange.processing_time_ms);
                    self.log.add(exchange.clone());

                    if let Err(e) = self
                        .event_tx
                        .send(CommandHandlerEvent::ResponseReady(exchange))
                    {
                        error!("Failed to send response event: {}", e);
                        break;
                    }
                }

                Ok(CommandHandlerCommand::Shutdown) => {
                    info!("Command handler received shutdown command");
                    let _ = self.event_tx.send(CommandHandlerEvent::Shutdown);
                    break;
                }

                Err(e) => {
                    debug!("Command channel closed: {}", e);
                    break;
                }
            }
        }

        info!("Command handler worker stopped");
        Ok(())
    }
}
