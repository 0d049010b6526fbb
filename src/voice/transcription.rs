//! Whisper transcription functionality.

use std::path::Path;
use std::process::Command;

use super::RecognitionError;

/// Map a locale ("en-US") to the language code whisper expects ("en")
pub fn whisper_language(locale: &str) -> String {
    let code = locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .trim()
        .to_lowercase();

    if code.is_empty() { "en".to_string() } else { code }
}

/// Run whisper-cpp on an audio file
pub fn run_whisper(
    audio_path: &Path,
    model_path: &Path,
    language: &str,
) -> Result<String, RecognitionError> {
    let output = Command::new("whisper-cli")
        .arg("-m")
        .arg(model_path)
        .arg("-f")
        .arg(audio_path)
        .arg("--no-timestamps")
        .arg("-l")
        .arg(whisper_language(language))
        .output()
        .map_err(|e| RecognitionError::Transcription(format!("failed to run whisper: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RecognitionError::Transcription(stderr.trim().to_string()));
    }

    parse_whisper_output(&String::from_utf8_lossy(&output.stdout))
}

/// Join whisper's output lines into one transcript
///
/// Whisper marks silence with bracketed tags like "[BLANK_AUDIO]"; those are
/// dropped. Nothing left means no speech.
pub fn parse_whisper_output(stdout: &str) -> Result<String, RecognitionError> {
    let text = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !(line.starts_with('[') && line.ends_with(']')))
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return Err(RecognitionError::NoSpeech);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whisper_language() {
        assert_eq!(whisper_language("en-US"), "en");
        assert_eq!(whisper_language("de_DE"), "de");
        assert_eq!(whisper_language("fr"), "fr");
        assert_eq!(whisper_language(""), "en");
    }

    #[test]
    fn test_parse_whisper_output() {
        let text = parse_whisper_output("\n Search for cats\n  and dogs \n").unwrap();
        assert_eq!(text, "Search for cats and dogs");
    }

    #[test]
    fn test_parse_whisper_output_blank_audio() {
        assert!(matches!(
            parse_whisper_output("[BLANK_AUDIO]\n"),
            Err(RecognitionError::NoSpeech)
        ));
        assert!(matches!(
            parse_whisper_output("   \n"),
            Err(RecognitionError::NoSpeech)
        ));
    }
}
