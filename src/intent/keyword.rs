//! Intent enum and the ordered keyword table.

use serde::{Deserialize, Serialize};

/// The command family a transcript belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Search,
    Open,
    Play,
    /// No keyword matched. A terminal outcome, not an error.
    Unrecognized,
}

impl Intent {
    /// The keyword that selects this intent, if any
    pub fn keyword(&self) -> Option<&'static str> {
        KEYWORD_PRIORITY
            .iter()
            .find(|(_, intent)| intent == self)
            .map(|(keyword, _)| *keyword)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Search => write!(f, "search"),
            Intent::Open => write!(f, "open"),
            Intent::Play => write!(f, "play"),
            Intent::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Keywords in the order they are tested.
///
/// The first keyword contained in the transcript wins, so "search and open"
/// resolves to Search. Users issuing ambiguous commands observe this order
/// directly; keep it stable.
pub const KEYWORD_PRIORITY: [(&str, Intent); 3] = [
    ("search", Intent::Search),
    ("open", Intent::Open),
    ("play", Intent::Play),
];

/// Find the first keyword (in priority order) contained in `text`
///
/// Matching is case-insensitive substring containment, not word matching:
/// "replay" contains "play".
pub fn matched_keyword(text: &str) -> Option<(&'static str, Intent)> {
    let text_lower = text.to_lowercase();

    KEYWORD_PRIORITY
        .iter()
        .find(|(keyword, _)| text_lower.contains(keyword))
        .copied()
}

/// Classify a transcript. Total: always returns an intent.
pub fn classify(transcript: &str) -> Intent {
    matched_keyword(transcript)
        .map(|(_, intent)| intent)
        .unwrap_or(Intent::Unrecognized)
}
