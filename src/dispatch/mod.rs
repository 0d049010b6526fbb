//! Action dispatcher - routes a command to its handler and reports the outcome
//!
//! | Intent       | Behavior                                                     |
//! |--------------|--------------------------------------------------------------|
//! | Search       | empty argument: nothing. Otherwise local navigation or       |
//! |              | `/action/search`, depending on [`DispatchMode`]              |
//! | Open         | `/action/open`, notice uses the resolved app name            |
//! | Play         | `/action/play` or a provider endpoint, notice uses the title |
//! | Unrecognized | "Command not recognized.", no gateway call                   |
//!
//! Every outcome, including transport failures, ends in exactly one
//! notification. Nothing is retried and no error escapes.

mod media;
mod notice;

pub use media::{play_request, youtube_url};
pub use notice::Notice;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::gateway::url::fill_template;
use crate::gateway::{ActionGateway, ActionRequest, ActionResult};
use crate::intent::{Command, Intent};
use crate::launcher::Launcher;
use crate::notify::Notifier;

/// Where search happens and where transcripts come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Local transcription; search navigates directly without a gateway round trip
    #[default]
    Local,
    /// Transcript relayed through the gateway; search is a gateway call too
    Relayed,
}

impl std::fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchMode::Local => write!(f, "local"),
            DispatchMode::Relayed => write!(f, "relayed"),
        }
    }
}

impl std::str::FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(DispatchMode::Local),
            "relayed" | "relay" => Ok(DispatchMode::Relayed),
            other => Err(format!("unknown dispatch mode: {}", other)),
        }
    }
}

/// Routes commands to the launcher or the gateway and notifies the outcome
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn ActionGateway>,
    launcher: Arc<dyn Launcher>,
    notifier: Arc<dyn Notifier>,
    mode: DispatchMode,
    search_url: String,
}

impl Dispatcher {
    pub fn new(
        gateway: Arc<dyn ActionGateway>,
        launcher: Arc<dyn Launcher>,
        notifier: Arc<dyn Notifier>,
        mode: DispatchMode,
    ) -> Self {
        Self {
            gateway,
            launcher,
            notifier,
            mode,
            search_url: crate::config::default_search_url(),
        }
    }

    /// Override the local search location (`{query}` placeholder)
    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    /// Dispatch a command and notify the user once its handler has settled
    ///
    /// Returns the notice that was shown, or `None` when there was nothing to do
    /// (search without a query).
    pub async fn dispatch(&self, command: &Command) -> Option<Notice> {
        debug!(
            "[natasha:dispatch] {} {:?} (mode: {})",
            command.intent, command.argument, self.mode
        );

        let notice = match command.intent {
            Intent::Search => self.search(&command.argument).await?,
            Intent::Open => self.open(&command.argument).await,
            Intent::Play => self.play(&command.argument).await,
            Intent::Unrecognized => Notice::NotRecognized,
        };

        self.notify(&notice);
        Some(notice)
    }

    /// Show a notice through the notifier
    pub fn notify(&self, notice: &Notice) {
        if notice.is_failure() {
            warn!("[natasha:dispatch] {}", notice);
        }
        self.notifier.notify(&notice.to_string());
    }

    async fn search(&self, query: &str) -> Option<Notice> {
        if query.is_empty() {
            debug!("[natasha:dispatch] Search without a query, nothing to do");
            return None;
        }

        let result = match self.mode {
            DispatchMode::Local => self.search_locally(query),
            DispatchMode::Relayed => {
                self.call(ActionRequest::Search {
                    query: query.to_string(),
                })
                .await
            }
        };

        Some(if result.is_success() {
            Notice::SearchComplete
        } else {
            Notice::SearchFailed
        })
    }

    fn search_locally(&self, query: &str) -> ActionResult {
        let url = fill_template(&self.search_url, query);
        info!("[natasha:dispatch] Opening {}", url);

        match self.launcher.open(&url) {
            Ok(()) => ActionResult::success(None),
            Err(e) => {
                warn!("[natasha:dispatch] Failed to open {}: {}", url, e);
                ActionResult::failure()
            }
        }
    }

    async fn open(&self, app: &str) -> Notice {
        let result = self
            .call(ActionRequest::Open {
                app: app.to_string(),
            })
            .await;

        if result.is_success() {
            Notice::Opened(resolved_name(result.detail, app, "application"))
        } else {
            Notice::OpenFailed
        }
    }

    async fn play(&self, media: &str) -> Notice {
        let result = self.call(play_request(media)).await;

        if result.is_success() {
            Notice::Playing(resolved_name(result.detail, media, "media"))
        } else {
            Notice::PlayFailed
        }
    }

    /// Gateway call with transport failures folded into a failure result
    async fn call(&self, request: ActionRequest) -> ActionResult {
        match self.gateway.execute(&request).await {
            Ok(result) => result,
            Err(e) => {
                warn!("[natasha:dispatch] {} failed: {}", request.path(), e);
                ActionResult::failure()
            }
        }
    }
}

/// Payload detail, else the argument, else a generic noun
fn resolved_name(detail: Option<String>, argument: &str, generic: &str) -> String {
    detail
        .filter(|d| !d.trim().is_empty())
        .or_else(|| Some(argument.trim().to_string()).filter(|a| !a.is_empty()))
        .unwrap_or_else(|| generic.to_string())
}
