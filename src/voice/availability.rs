//! Voice dependency checks.

use std::path::Path;
use std::process::Command;

use super::RecognitionError;

fn binary_available(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Check that whisper (and sox when recording) are installed and the model exists
pub fn check_availability(model_path: &Path, needs_recorder: bool) -> Result<(), RecognitionError> {
    if needs_recorder && !binary_available("rec") {
        return Err(RecognitionError::Unavailable(
            "sox not found. Install with: brew install sox (or apt install sox)".to_string(),
        ));
    }

    if !binary_available("whisper-cli") {
        return Err(RecognitionError::Unavailable(
            "whisper-cli not found. Install with: brew install whisper-cpp".to_string(),
        ));
    }

    if !model_path.exists() {
        return Err(RecognitionError::Unavailable(format!(
            "Whisper model not found at {}",
            model_path.display()
        )));
    }

    Ok(())
}
