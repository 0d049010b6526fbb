//! Settings sections of the configuration file

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchMode;

/// Action Gateway connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Base URL of the gateway, e.g. "http://127.0.0.1:5000"
    #[serde(default = "default_gateway_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Bounds how long a pending call can stay in flight
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

fn default_gateway_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_read_timeout() -> u64 {
    30
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
        }
    }
}

/// Dispatcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// "local": transcribe locally, search opens the browser directly
    /// "relayed": transcript comes from the gateway, search goes through it
    #[serde(default)]
    pub mode: DispatchMode,

    /// Search results location; `{query}` is replaced by the encoded query
    #[serde(default = "default_search_url")]
    pub search_url: String,
}

pub fn default_search_url() -> String {
    "https://www.google.com/search?q={query}".to_string()
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            mode: DispatchMode::default(),
            search_url: default_search_url(),
        }
    }
}

/// Speech recognition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Recognition language. Only one language is supported at a time.
    #[serde(default = "default_language")]
    pub language: String,

    /// Path to the whisper model file
    #[serde(default = "default_whisper_model")]
    pub whisper_model: PathBuf,

    /// How long a voice activation records (in seconds)
    #[serde(default = "default_record_seconds")]
    pub record_seconds: f32,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_whisper_model() -> PathBuf {
    super::Config::global_config_dir()
        .join("models")
        .join("ggml-base.en.bin")
}

fn default_record_seconds() -> f32 {
    5.0
}

impl VoiceSettings {
    /// The whisper model path with a leading `~/` expanded to the home directory
    pub fn whisper_model_path(&self) -> PathBuf {
        expand_home(&self.whisper_model)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            whisper_model: default_whisper_model(),
            record_seconds: default_record_seconds(),
        }
    }
}

/// How outcomes are presented
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierSettings {
    /// Also speak messages aloud (say / espeak)
    #[serde(default)]
    pub speak: bool,
}

/// Reference gateway server settings (`natasha serve`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Directory searched for `/action/play` media files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_dir: Option<PathBuf>,

    /// Application name -> URL, file or program to launch
    #[serde(default = "default_apps")]
    pub apps: BTreeMap<String, String>,
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_apps() -> BTreeMap<String, String> {
    let mut apps = BTreeMap::new();
    apps.insert("browser".to_string(), "https://www.google.com".to_string());
    apps
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            media_dir: None,
            apps: default_apps(),
        }
    }
}
