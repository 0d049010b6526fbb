//! Audio capture with sox `rec`.

use std::path::Path;
use std::process::{Command, Stdio};

use super::RecognitionError;

/// Record a fixed-length clip to `recording_path`, blocking until done
pub fn record_clip(recording_path: &Path, seconds: f32) -> Result<(), RecognitionError> {
    let path = recording_path
        .to_str()
        .ok_or_else(|| RecognitionError::Recording("recording path is not UTF-8".to_string()))?;

    let status = Command::new("rec")
        .args([
            "-q",
            "-r",
            "16000", // whisper wants 16kHz
            "-c",
            "1",
            "-b",
            "16",
            path,
            "trim",
            "0",
            &format!("{}", seconds.max(0.5)),
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| RecognitionError::Recording(e.to_string()))?;

    if !status.success() {
        return Err(RecognitionError::Recording(format!("rec exited with {}", status)));
    }

    if !recording_path.exists() {
        return Err(RecognitionError::Recording(
            "rec did not produce an audio file".to_string(),
        ));
    }

    Ok(())
}
