use anyhow::{Context, Result};
use qagent::integration::{AgentConfig, CommandHandler, CommandHandlerEvent};
use qagent::VoiceAgent;
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing; stdout carries the spoken replies
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qagent=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AgentConfig::from_env().context("Failed to load configuration")?;
    info!("Starting QAgent voice commands against {}", config.orchestrator_url);

    let agent = VoiceAgent::new(&config).context("Failed to create voice agent")?;
    let (handler, worker) = CommandHandler::new(agent);
    let worker_handle = worker.start();

    // Each stdin line stands in for one finalized transcription
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        handler.process_utterance(line)?;
        match handler.recv_event()? {
            CommandHandlerEvent::ResponseReady(exchange) => {
                writeln!(stdout, "{}", exchange.response)?;
                stdout.flush()?;
            }
            CommandHandlerEvent::Shutdown => break,
        }
    }

    let _ = handler.shutdown();
    let _ = worker_handle.join();

    let log = handler.log();
    if let Some(avg) = log.average_processing_ms() {
        info!("Answered {} utterances, {}ms average", log.len(), avg);
    }
    info!("QAgent voice commands stopped");

    Ok(())
}
