//! Intent resolution - turning a transcript into a command
//!
//! A transcript is matched against a fixed, ordered keyword table. The first
//! keyword contained in the transcript decides the intent, and the rest of the
//! transcript (keyword removed, whitespace trimmed) becomes the argument.
//!
//! Example transcripts:
//! - "search rust async book" -> Search, "rust async book"
//! - "open browser" -> Open, "browser"
//! - "play despacito on spotify" -> Play, "despacito on spotify"
//! - "search and open" -> Search, "and open" (search is tested first)

mod command;
mod keyword;

pub use command::{Command, Transcript, extract_argument};
pub use keyword::{Intent, KEYWORD_PRIORITY, classify, matched_keyword};
