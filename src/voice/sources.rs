//! Transcription source implementations.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::availability::check_availability;
use super::recording::record_clip;
use super::transcription::run_whisper;
use super::{RecognitionError, TranscriptionSource};
use crate::config::VoiceSettings;
use crate::gateway::ActionGateway;

/// A transcript that is already known (typed text, tests)
#[derive(Debug, Clone)]
pub struct FixedTranscript(String);

impl FixedTranscript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

#[async_trait]
impl TranscriptionSource for FixedTranscript {
    async fn listen(&self) -> Result<String, RecognitionError> {
        if self.0.trim().is_empty() {
            return Err(RecognitionError::NoSpeech);
        }
        Ok(self.0.clone())
    }
}

/// Local speech recognition: sox `rec` + `whisper-cli`
#[derive(Debug, Clone)]
pub struct WhisperSource {
    model_path: PathBuf,
    language: String,
    record_seconds: f32,
    /// Transcribe this file instead of recording
    audio_file: Option<PathBuf>,
}

impl WhisperSource {
    pub fn from_settings(settings: &VoiceSettings) -> Self {
        Self {
            model_path: settings.whisper_model_path(),
            language: settings.language.clone(),
            record_seconds: settings.record_seconds,
            audio_file: None,
        }
    }

    pub fn with_audio_file(mut self, audio_file: impl Into<PathBuf>) -> Self {
        self.audio_file = Some(audio_file.into());
        self
    }

    /// Record (unless an audio file was given) and transcribe, blocking
    pub fn listen_blocking(&self) -> Result<String, RecognitionError> {
        check_availability(&self.model_path, self.audio_file.is_none())?;

        if let Some(audio_file) = &self.audio_file {
            debug!("[natasha:voice] Transcribing {}", audio_file.display());
            return run_whisper(audio_file, &self.model_path, &self.language);
        }

        let recording_path =
            std::env::temp_dir().join(format!("natasha-recording-{}.wav", std::process::id()));

        info!("[natasha:voice] Listening for {:.1}s...", self.record_seconds);
        record_clip(&recording_path, self.record_seconds)?;

        let result = run_whisper(&recording_path, &self.model_path, &self.language);
        let _ = std::fs::remove_file(&recording_path);

        result
    }
}

#[async_trait]
impl TranscriptionSource for WhisperSource {
    async fn listen(&self) -> Result<String, RecognitionError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.listen_blocking())
            .await
            .map_err(|e| RecognitionError::Worker(e.to_string()))?
    }
}

/// Transcription performed by the Action Gateway (`/voice/command`)
pub struct RelayedSource {
    gateway: Arc<dyn ActionGateway>,
}

impl RelayedSource {
    pub fn new(gateway: Arc<dyn ActionGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl TranscriptionSource for RelayedSource {
    async fn listen(&self) -> Result<String, RecognitionError> {
        let command = self.gateway.relay_command().await?;
        if command.trim().is_empty() {
            return Err(RecognitionError::NoSpeech);
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_transcript() {
        let source = FixedTranscript::new("open browser");
        assert_eq!(source.listen().await.unwrap(), "open browser");

        let empty = FixedTranscript::new("  ");
        assert!(matches!(empty.listen().await, Err(RecognitionError::NoSpeech)));
    }

    #[tokio::test]
    async fn test_whisper_missing_model_is_unavailable() {
        let settings = VoiceSettings {
            whisper_model: PathBuf::from("/nonexistent/natasha/model.bin"),
            ..Default::default()
        };
        let source = WhisperSource::from_settings(&settings).with_audio_file("/nonexistent/a.wav");
        assert!(matches!(
            source.listen().await,
            Err(RecognitionError::Unavailable(_))
        ));
    }
}
