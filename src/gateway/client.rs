//! HTTP client for the Action Gateway.
//!
//! Requests are made with a blocking `ureq` agent on tokio's blocking pool so
//! callers can await them without stalling the runtime.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    ActionGateway, ActionRequest, ActionResponse, ActionResult, GatewayError, RelayResponse,
};
use crate::config::GatewaySettings;

/// Path of the relay endpoint
const RELAY_PATH: &str = "/voice/command";

/// Gateway client talking HTTP/JSON
#[derive(Clone)]
pub struct HttpGateway {
    base_url: String,
    client: ureq::Agent,
}

impl HttpGateway {
    /// Create a client for a base URL with default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeouts(base_url, Duration::from_secs(5), Duration::from_secs(30))
    }

    /// Create a client from the `[gateway]` settings
    pub fn from_settings(settings: &GatewaySettings) -> Self {
        Self::with_timeouts(
            settings.base_url.clone(),
            Duration::from_secs(settings.connect_timeout_secs),
            Duration::from_secs(settings.read_timeout_secs),
        )
    }

    pub fn with_timeouts(base_url: impl Into<String>, connect: Duration, read: Duration) -> Self {
        let client = ureq::AgentBuilder::new()
            .timeout_connect(connect)
            .timeout_read(read)
            .build();

        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// GET `path` with optional query parameter and decode the JSON body
    async fn get_json<T>(
        &self,
        path: &str,
        param: Option<(&str, &str)>,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = format!("{}{}", self.base_url, path);
        let param = param.map(|(name, value)| (name.to_string(), value.to_string()));
        let client = self.client.clone();

        debug!("[natasha:gateway] GET {} {:?}", url, param);

        tokio::task::spawn_blocking(move || {
            let mut request = client.get(&url);
            if let Some((name, value)) = &param {
                request = request.query(name, value);
            }

            let response = request.call().map_err(|e| match e {
                ureq::Error::Status(code, _) => GatewayError::Status(code),
                ureq::Error::Transport(t) => GatewayError::Transport(t.to_string()),
            })?;

            response
                .into_json::<T>()
                .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
        })
        .await
        .map_err(|e| GatewayError::Worker(e.to_string()))?
    }
}

#[async_trait]
impl ActionGateway for HttpGateway {
    async fn execute(&self, request: &ActionRequest) -> Result<ActionResult, GatewayError> {
        let response: ActionResponse = self
            .get_json(request.path(), Some(request.param()))
            .await
            .inspect_err(|e| warn!("[natasha:gateway] {} failed: {}", request.path(), e))?;

        if let Some(error) = &response.error {
            debug!("[natasha:gateway] {} reported: {}", request.path(), error);
        }

        Ok(response.into_result(request))
    }

    async fn relay_command(&self) -> Result<String, GatewayError> {
        let response: RelayResponse = self
            .get_json(RELAY_PATH, None)
            .await
            .inspect_err(|e| warn!("[natasha:gateway] {} failed: {}", RELAY_PATH, e))?;

        Ok(response.command)
    }
}
