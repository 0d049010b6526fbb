//! Action Gateway - the HTTP service that performs search/open/play
//!
//! The gateway exposes one GET endpoint per action family:
//! - GET /voice/command - relay: the gateway listens and returns `{ command }`
//! - GET /action/search?q=... - `{ status }`
//! - GET /action/open?app=... - `{ status, app }`
//! - GET /action/play?media=... - `{ status, media }`
//! - GET /action/play/spotify?track=... - `{ status, track }`
//! - GET /action/play/youtube?url=... - `{ status, video }`
//!
//! Any `status` other than `"success"` is a failure. Transport problems are
//! reported as [`GatewayError`]; callers treat both the same way.

mod client;
pub mod server;
pub mod url;

pub use client::HttpGateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome status of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Success,
    Failure,
}

/// Result of a local effect or a gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub status: ActionStatus,
    /// Human-readable detail (resolved app name, track title, ...)
    pub detail: Option<String>,
}

impl ActionResult {
    pub fn success(detail: Option<String>) -> Self {
        Self {
            status: ActionStatus::Success,
            detail,
        }
    }

    pub fn failure() -> Self {
        Self {
            status: ActionStatus::Failure,
            detail: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }
}

/// A concrete gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Search { query: String },
    Open { app: String },
    Play { media: String },
    PlaySpotify { track: String },
    PlayYoutube { url: String },
}

impl ActionRequest {
    /// Endpoint path for this action
    pub fn path(&self) -> &'static str {
        match self {
            ActionRequest::Search { .. } => "/action/search",
            ActionRequest::Open { .. } => "/action/open",
            ActionRequest::Play { .. } => "/action/play",
            ActionRequest::PlaySpotify { .. } => "/action/play/spotify",
            ActionRequest::PlayYoutube { .. } => "/action/play/youtube",
        }
    }

    /// Query parameter name and value
    pub fn param(&self) -> (&'static str, &str) {
        match self {
            ActionRequest::Search { query } => ("q", query.as_str()),
            ActionRequest::Open { app } => ("app", app.as_str()),
            ActionRequest::Play { media } => ("media", media.as_str()),
            ActionRequest::PlaySpotify { track } => ("track", track.as_str()),
            ActionRequest::PlayYoutube { url } => ("url", url.as_str()),
        }
    }

    /// Name of the response field that carries the human-readable detail
    pub fn detail_field(&self) -> Option<&'static str> {
        match self {
            ActionRequest::Search { .. } => None,
            ActionRequest::Open { .. } => Some("app"),
            ActionRequest::Play { .. } => Some("media"),
            ActionRequest::PlaySpotify { .. } => Some("track"),
            ActionRequest::PlayYoutube { .. } => Some("video"),
        }
    }

    /// Build a request from an endpoint path and its parameter value
    pub fn from_path(path: &str, value: String) -> Option<Self> {
        match path {
            "/action/search" => Some(ActionRequest::Search { query: value }),
            "/action/open" => Some(ActionRequest::Open { app: value }),
            "/action/play" => Some(ActionRequest::Play { media: value }),
            "/action/play/spotify" => Some(ActionRequest::PlaySpotify { track: value }),
            "/action/play/youtube" => Some(ActionRequest::PlayYoutube { url: value }),
            _ => None,
        }
    }

    /// Parameter name expected by an endpoint path
    pub fn param_for_path(path: &str) -> Option<&'static str> {
        Self::from_path(path, String::new()).map(|r| r.param().0)
    }
}

/// JSON body returned by the action endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAILURE: &str = "failure";

impl ActionResponse {
    /// Build the response body for a result of the given request
    pub fn from_result(request: &ActionRequest, result: &ActionResult) -> Self {
        let mut response = ActionResponse {
            status: if result.is_success() {
                STATUS_SUCCESS.to_string()
            } else {
                STATUS_FAILURE.to_string()
            },
            ..Default::default()
        };

        let detail = result.detail.clone();
        match request.detail_field() {
            Some("app") => response.app = detail,
            Some("media") => response.media = detail,
            Some("track") => response.track = detail,
            Some("video") => response.video = detail,
            _ => {}
        }

        response
    }

    /// Interpret the body for the given request
    pub fn into_result(self, request: &ActionRequest) -> ActionResult {
        if self.status != STATUS_SUCCESS {
            return ActionResult::failure();
        }

        let detail = match request.detail_field() {
            Some("app") => self.app,
            Some("media") => self.media,
            Some("track") => self.track,
            Some("video") => self.video,
            _ => None,
        };

        ActionResult::success(detail.filter(|d| !d.trim().is_empty()))
    }
}

/// JSON body returned by `/voice/command`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayResponse {
    pub command: String,
}

/// Transport-level gateway failure
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway unreachable: {0}")]
    Transport(String),

    #[error("Gateway returned HTTP {0}")]
    Status(u16),

    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    #[error("Gateway worker failed: {0}")]
    Worker(String),
}

/// Client side of the Action Gateway
///
/// Every call is asynchronous; its completion is the only trigger for the
/// notification that reports it.
#[async_trait]
pub trait ActionGateway: Send + Sync {
    /// Perform an action
    async fn execute(&self, request: &ActionRequest) -> Result<ActionResult, GatewayError>;

    /// Ask the gateway to listen and return the transcribed command
    async fn relay_command(&self) -> Result<String, GatewayError>;
}
