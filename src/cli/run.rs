//! Run and listen commands

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use natasha::config::Config;
use natasha::gateway::{ActionGateway, HttpGateway};
use natasha::launcher::SystemLauncher;
use natasha::notify::notifier_from_settings;
use natasha::session::{Activation, VoiceSession};
use natasha::voice::{FixedTranscript, RelayedSource, TranscriptionSource, WhisperSource};
use natasha::{DispatchMode, Dispatcher};

use super::Overrides;

fn build_dispatcher(config: &Config, gateway: Arc<dyn ActionGateway>) -> Dispatcher {
    Dispatcher::new(
        gateway,
        Arc::new(SystemLauncher),
        notifier_from_settings(&config.notifier),
        config.dispatch.mode,
    )
    .with_search_url(config.dispatch.search_url.clone())
}

async fn activate(
    config: &Config,
    source: Arc<dyn TranscriptionSource>,
    gateway: Arc<dyn ActionGateway>,
) {
    let dispatcher = build_dispatcher(config, gateway);
    let session = VoiceSession::new(source, dispatcher);

    match session.activate().await {
        Activation::Dispatched { command, notice } => {
            debug!(
                "[natasha:cli] {} {:?} -> {:?}",
                command.intent, command.argument, notice
            );
        }
        other => debug!("[natasha:cli] Activation ended: {:?}", other),
    }
}

/// Dispatch a typed command as if it had been spoken
pub async fn run_command(overrides: &Overrides, text: &str) -> Result<()> {
    let config = overrides.load_config()?;
    let gateway: Arc<dyn ActionGateway> = Arc::new(HttpGateway::from_settings(&config.gateway));

    activate(&config, Arc::new(FixedTranscript::new(text)), gateway).await;
    Ok(())
}

/// One voice activation: local whisper or the gateway's relay endpoint
pub async fn listen_command(overrides: &Overrides, audio: Option<PathBuf>) -> Result<()> {
    let config = overrides.load_config()?;
    let gateway: Arc<dyn ActionGateway> = Arc::new(HttpGateway::from_settings(&config.gateway));

    let source: Arc<dyn TranscriptionSource> = match (config.dispatch.mode, audio) {
        (DispatchMode::Relayed, Some(_)) => {
            anyhow::bail!("--audio is only supported in local mode");
        }
        (DispatchMode::Relayed, None) => Arc::new(RelayedSource::new(gateway.clone())),
        (DispatchMode::Local, audio) => {
            let source = WhisperSource::from_settings(&config.voice);
            match audio {
                Some(path) => Arc::new(source.with_audio_file(path)),
                None => Arc::new(source),
            }
        }
    };

    activate(&config, source, gateway).await;
    Ok(())
}
