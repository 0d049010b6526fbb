//! System backend: performs actions on the machine running the gateway.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::ActionBackend;
use crate::config::Config;
use crate::gateway::url::{encode_component, fill_template, parse_query};
use crate::gateway::{ActionRequest, ActionResult};
use crate::launcher::{Launcher, is_location};
use crate::voice::{RecognitionError, WhisperSource};

const SPOTIFY_SEARCH_URL: &str = "https://open.spotify.com/search/";

/// Opens URLs, applications and media files through a [`Launcher`]
pub struct SystemBackend {
    launcher: Arc<dyn Launcher>,
    search_url: String,
    /// Lower-cased application name -> target
    apps: BTreeMap<String, String>,
    media_dir: Option<PathBuf>,
    recognizer: Option<WhisperSource>,
}

impl SystemBackend {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        let config = Config::default();
        Self::from_config(&config, launcher).without_recognizer()
    }

    pub fn from_config(config: &Config, launcher: Arc<dyn Launcher>) -> Self {
        Self {
            launcher,
            search_url: config.dispatch.search_url.clone(),
            apps: config
                .server
                .apps
                .iter()
                .map(|(name, target)| (name.trim().to_lowercase(), target.clone()))
                .collect(),
            media_dir: config.server.media_dir.clone(),
            recognizer: Some(WhisperSource::from_settings(&config.voice)),
        }
    }

    pub fn with_app(mut self, name: impl AsRef<str>, target: impl Into<String>) -> Self {
        self.apps
            .insert(name.as_ref().trim().to_lowercase(), target.into());
        self
    }

    pub fn with_media_dir(mut self, media_dir: impl Into<PathBuf>) -> Self {
        self.media_dir = Some(media_dir.into());
        self
    }

    /// Disable the relay endpoint's speech recognition
    pub fn without_recognizer(mut self) -> Self {
        self.recognizer = None;
        self
    }

    fn open_target(&self, target: &str) -> bool {
        let result = if is_location(target) {
            self.launcher.open(target)
        } else {
            self.launcher.launch(target)
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("[natasha:backend] Failed to open {}: {}", target, e);
                false
            }
        }
    }

    fn search(&self, query: &str) -> ActionResult {
        let url = fill_template(&self.search_url, query);
        if self.open_target(&url) {
            ActionResult::success(None)
        } else {
            ActionResult::failure()
        }
    }

    fn open_app(&self, app: &str) -> ActionResult {
        let key = app.trim().to_lowercase();
        let Some(target) = self.apps.get(&key) else {
            info!("[natasha:backend] Application not recognized: {}", app);
            return ActionResult::failure();
        };

        if self.open_target(target) {
            ActionResult::success(Some(app.trim().to_string()))
        } else {
            ActionResult::failure()
        }
    }

    fn play_media(&self, media: &str) -> ActionResult {
        let Some(media_dir) = &self.media_dir else {
            info!("[natasha:backend] No media directory configured");
            return ActionResult::failure();
        };

        let Some(path) = find_media(media_dir, media) else {
            info!("[natasha:backend] Media not found: {}", media);
            return ActionResult::failure();
        };

        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| media.to_string());

        if self.open_target(&path.to_string_lossy()) {
            ActionResult::success(Some(title))
        } else {
            ActionResult::failure()
        }
    }

    fn play_spotify(&self, track: &str) -> ActionResult {
        let url = format!("{}{}", SPOTIFY_SEARCH_URL, encode_component(track));
        if self.open_target(&url) {
            ActionResult::success(Some(track.to_string()))
        } else {
            ActionResult::failure()
        }
    }

    fn play_youtube(&self, url: &str) -> ActionResult {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            info!("[natasha:backend] Not a URL: {}", url);
            return ActionResult::failure();
        }

        if self.open_target(url) {
            ActionResult::success(Some(video_title(url)))
        } else {
            ActionResult::failure()
        }
    }
}

impl ActionBackend for SystemBackend {
    fn perform(&self, request: &ActionRequest) -> ActionResult {
        match request {
            ActionRequest::Search { query } => self.search(query),
            ActionRequest::Open { app } => self.open_app(app),
            ActionRequest::Play { media } => self.play_media(media),
            ActionRequest::PlaySpotify { track } => self.play_spotify(track),
            ActionRequest::PlayYoutube { url } => self.play_youtube(url),
        }
    }

    fn listen(&self) -> Result<String, RecognitionError> {
        match &self.recognizer {
            Some(recognizer) => recognizer.listen_blocking(),
            None => Err(RecognitionError::Unavailable(
                "speech recognition is disabled on this gateway".to_string(),
            )),
        }
    }
}

/// Find a file in `media_dir` whose stem matches `media` (case-insensitive)
fn find_media(media_dir: &Path, media: &str) -> Option<PathBuf> {
    let wanted = media.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    let entries = std::fs::read_dir(media_dir)
        .inspect_err(|e| warn!("[natasha:backend] Cannot read {}: {}", media_dir.display(), e))
        .ok()?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().to_lowercase() == wanted)
                .unwrap_or(false)
        })
        .collect();

    // read_dir order is unspecified
    matches.sort();
    matches.into_iter().next()
}

/// Human-readable title for a video URL
fn video_title(url: &str) -> String {
    let params = parse_query(url);
    params
        .get("search_query")
        .or_else(|| params.get("v"))
        .cloned()
        .unwrap_or_else(|| url.to_string())
}
