//! Shared test doubles for the dispatcher, session and gateway tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use async_trait::async_trait;
use tokio::sync::Notify;

use natasha::gateway::server::ActionBackend;
use natasha::gateway::{ActionGateway, ActionRequest, ActionResult, GatewayError};
use natasha::launcher::Launcher;
use natasha::notify::Notifier;
use natasha::voice::RecognitionError;
use natasha::{DispatchMode, Dispatcher};

/// Notifier that keeps every message
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Launcher that records targets instead of opening them
#[derive(Default)]
pub struct RecordingLauncher {
    opened: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn open(&self, target: &str) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(target.to_string());
        Ok(())
    }

    fn launch(&self, program: &str) -> std::io::Result<()> {
        self.open(program)
    }
}

/// Gateway answering every action with the same result
pub struct ScriptedGateway {
    result: ActionResult,
    relayed: Option<String>,
    /// When set, each call waits for a permit before answering
    gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<ActionRequest>>,
}

impl ScriptedGateway {
    pub fn answering(result: ActionResult) -> Self {
        Self {
            result,
            relayed: None,
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_relayed(mut self, command: impl Into<String>) -> Self {
        self.relayed = Some(command.into());
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<ActionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActionGateway for ScriptedGateway {
    async fn execute(&self, request: &ActionRequest) -> Result<ActionResult, GatewayError> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.result.clone())
    }

    async fn relay_command(&self) -> Result<String, GatewayError> {
        self.relayed.clone().ok_or(GatewayError::Status(503))
    }
}

/// Server-side backend that records requests and succeeds for known apps
#[derive(Default)]
pub struct ScriptedBackend {
    pub requests: Mutex<Vec<ActionRequest>>,
    pub transcript: Option<String>,
}

impl ScriptedBackend {
    pub fn requests(&self) -> Vec<ActionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ActionBackend for ScriptedBackend {
    fn perform(&self, request: &ActionRequest) -> ActionResult {
        self.requests.lock().unwrap().push(request.clone());
        match request {
            ActionRequest::Open { app } if app == "browser" => {
                ActionResult::success(Some("browser".to_string()))
            }
            ActionRequest::Search { .. } => ActionResult::success(None),
            ActionRequest::PlaySpotify { track } => ActionResult::success(Some(track.clone())),
            _ => ActionResult::failure(),
        }
    }

    fn listen(&self) -> Result<String, RecognitionError> {
        self.transcript.clone().ok_or(RecognitionError::NoSpeech)
    }
}

/// Dispatcher wired to test doubles
pub fn dispatcher(
    gateway: Arc<dyn ActionGateway>,
    mode: DispatchMode,
) -> (Dispatcher, Arc<RecordingNotifier>, Arc<RecordingLauncher>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let launcher = Arc::new(RecordingLauncher::default());
    let dispatcher = Dispatcher::new(gateway, launcher.clone(), notifier.clone(), mode);
    (dispatcher, notifier, launcher)
}

/// Serve exactly one request with a fixed status and body, returns the base URL
pub fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<()>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("Failed to bind test server");
    let addr = server
        .server_addr()
        .to_ip()
        .expect("Test server has no IP address");

    let handle = std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    (format!("http://{}", addr), handle)
}

/// A base URL nothing is listening on
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}", addr)
}
