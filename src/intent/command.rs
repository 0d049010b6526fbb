//! Transcript and Command types and argument extraction.

use std::ops::Range;

use serde::Serialize;

use super::keyword::{Intent, classify};

/// Text produced by speech-to-text, lower-cased on construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A classified transcript: the intent plus its free-text argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub intent: Intent,
    /// May be empty ("no argument given")
    pub argument: String,
}

impl Command {
    pub fn new(intent: Intent, argument: impl Into<String>) -> Self {
        Self {
            intent,
            argument: argument.into(),
        }
    }

    /// Classify a transcript and extract the argument for the matched keyword
    ///
    /// Unrecognized transcripts keep the whole (trimmed) transcript as argument.
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let intent = classify(transcript.as_str());
        match intent.keyword() {
            Some(keyword) => Self::new(intent, extract_argument(transcript.as_str(), keyword)),
            None => Self::new(Intent::Unrecognized, transcript.as_str().trim()),
        }
    }

    pub fn has_argument(&self) -> bool {
        !self.argument.is_empty()
    }
}

/// Remove the first occurrence of `keyword` from `transcript` and trim the rest
///
/// The keyword is matched case-insensitively, like [`classify`]; the remaining
/// text keeps its case. If the keyword is absent the transcript is returned
/// trimmed. An empty result is valid and means no argument was given.
pub fn extract_argument(transcript: &str, keyword: &str) -> String {
    match find_ignore_case(transcript, keyword) {
        Some(range) if !range.is_empty() => {
            let mut rest = String::with_capacity(transcript.len() - range.len());
            rest.push_str(&transcript[..range.start]);
            rest.push_str(&transcript[range.end..]);
            rest.trim().to_string()
        }
        _ => transcript.trim().to_string(),
    }
}

/// Byte range of the first case-insensitive occurrence of `needle`
fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    haystack.char_indices().find_map(|(start, _)| {
        let mut chars = haystack[start..].char_indices();
        let mut end = start;
        for wanted in needle.chars() {
            let (offset, c) = chars.next()?;
            if !c.to_lowercase().eq(wanted.to_lowercase()) {
                return None;
            }
            end = start + offset + c.len_utf8();
        }
        Some(start..end)
    })
}
