//! Speech recognition - the transcription sources
//!
//! A source produces one best-effort transcript per voice activation, or a
//! [`RecognitionError`]. Three sources exist:
//! - [`FixedTranscript`]: text supplied up front (typed on the command line)
//! - [`WhisperSource`]: records with sox `rec` and transcribes with `whisper-cli`
//! - [`RelayedSource`]: asks the Action Gateway's `/voice/command` endpoint

mod availability;
mod recording;
mod sources;
mod transcription;

pub use availability::check_availability;
pub use sources::{FixedTranscript, RelayedSource, WhisperSource};
pub use transcription::{parse_whisper_output, whisper_language};

use async_trait::async_trait;

use crate::gateway::GatewayError;

/// The transcription source could not produce text
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("Speech recognition unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to record audio: {0}")]
    Recording(String),

    #[error("Whisper failed: {0}")]
    Transcription(String),

    #[error("No speech detected")]
    NoSpeech,

    #[error("Relay failed: {0}")]
    Relay(#[from] GatewayError),

    #[error("Recognition worker failed: {0}")]
    Worker(String),
}

/// Produces a transcript for one voice activation
#[async_trait]
pub trait TranscriptionSource: Send + Sync {
    async fn listen(&self) -> Result<String, RecognitionError>;
}
