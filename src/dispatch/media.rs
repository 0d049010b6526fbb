//! Play argument routing to a media provider.
//!
//! "despacito on spotify" -> Spotify track "despacito"
//! "lofi beats on youtube" -> YouTube results page for "lofi beats"
//! anything else -> generic media identifier

use crate::gateway::ActionRequest;
use crate::gateway::url::encode_component;

const SPOTIFY_SUFFIX: &str = "on spotify";
const YOUTUBE_SUFFIX: &str = "on youtube";
const YOUTUBE_RESULTS_URL: &str = "https://www.youtube.com/results?search_query=";

/// Build the gateway request for a Play argument
pub fn play_request(argument: &str) -> ActionRequest {
    let argument = argument.trim();

    if let Some(track) = strip_suffix_word(argument, SPOTIFY_SUFFIX) {
        return ActionRequest::PlaySpotify {
            track: track.to_string(),
        };
    }

    if let Some(query) = strip_suffix_word(argument, YOUTUBE_SUFFIX) {
        return ActionRequest::PlayYoutube {
            url: youtube_url(query),
        };
    }

    ActionRequest::Play {
        media: argument.to_string(),
    }
}

/// A URL passes through; other text becomes a YouTube results page
pub fn youtube_url(query: &str) -> String {
    if query.starts_with("http://") || query.starts_with("https://") {
        query.to_string()
    } else {
        format!("{}{}", YOUTUBE_RESULTS_URL, encode_component(query))
    }
}

/// Strip `suffix` if the argument ends with it as whole words
fn strip_suffix_word<'a>(argument: &'a str, suffix: &str) -> Option<&'a str> {
    if argument == suffix {
        return Some("");
    }

    argument
        .strip_suffix(suffix)
        .filter(|rest| rest.ends_with(char::is_whitespace))
        .map(str::trim)
}
