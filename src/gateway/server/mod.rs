//! Reference Action Gateway server
//!
//! Serves the gateway endpoints on top of an [`ActionBackend`]:
//! - GET /ping - liveness `{ status, version }`
//! - GET /voice/command - backend listens, `{ command }` or 503
//! - GET /action/* - one endpoint per action, see [`ActionRequest`]

mod backend;

pub use backend::SystemBackend;

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{Result, anyhow};
use tiny_http::{Header, Request, Response, Server};
use tracing::{debug, error, info, warn};

use super::url::parse_query;
use super::{ActionRequest, ActionResponse, ActionResult, RelayResponse};
use crate::voice::RecognitionError;

/// Performs actions on behalf of the gateway server
pub trait ActionBackend: Send + Sync {
    /// Perform an action. Failures are results, not errors.
    fn perform(&self, request: &ActionRequest) -> ActionResult;

    /// Listen for a voice command (the relay endpoint)
    fn listen(&self) -> Result<String, RecognitionError>;
}

/// A running gateway server
pub struct GatewayServer {
    server: Arc<Server>,
    addr: SocketAddr,
    worker: Option<JoinHandle<()>>,
}

impl GatewayServer {
    /// Bind to `bind_addr` and serve requests on a background thread
    ///
    /// Use port 0 to pick a free port; [`GatewayServer::url`] has the bound address.
    pub fn start(bind_addr: &str, backend: Arc<dyn ActionBackend>) -> Result<Self> {
        let server = Server::http(bind_addr)
            .map_err(|e| anyhow!("Failed to start gateway server on {}: {}", bind_addr, e))?;

        let addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| anyhow!("Gateway server is not bound to an IP address"))?;

        info!("[natasha:http] Gateway listening on http://{}", addr);

        let server = Arc::new(server);
        let worker = {
            let server = Arc::clone(&server);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    handle_request(backend.as_ref(), request);
                }
                debug!("[natasha:http] Gateway server loop ended");
            })
        };

        Ok(Self {
            server,
            addr,
            worker: Some(worker),
        })
    }

    /// Base URL for clients, e.g. "http://127.0.0.1:5000"
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Block until the server loop ends
    pub fn wait(mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    /// Stop accepting requests and wait for the loop to end
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for GatewayServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn json_content_type() -> Option<Header> {
    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).ok()
}

fn respond_json(request: Request, status_code: u16, value: &impl serde::Serialize) {
    let body =
        serde_json::to_string(value).unwrap_or_else(|_| "{\"error\":\"serialize\"}".to_string());
    let mut response = Response::from_string(body).with_status_code(status_code);
    if let Some(header) = json_content_type() {
        response = response.with_header(header);
    }
    if let Err(e) = request.respond(response) {
        warn!("[natasha:http] Failed to send response: {}", e);
    }
}

fn respond_error(request: Request, status_code: u16, error: &str) {
    respond_json(request, status_code, &serde_json::json!({ "error": error }));
}

fn handle_request(backend: &dyn ActionBackend, request: Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or(url.as_str()).to_string();

    debug!("[natasha:http] {} {}", method, url);

    if method != "GET" {
        respond_error(request, 405, "method_not_allowed");
        return;
    }

    match path.as_str() {
        "/ping" => respond_json(
            request,
            200,
            &serde_json::json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
            }),
        ),
        "/voice/command" => handle_relay(backend, request),
        p if p.starts_with("/action/") => handle_action(backend, p, &url, request),
        _ => respond_error(request, 404, "not_found"),
    }
}

fn handle_relay(backend: &dyn ActionBackend, request: Request) {
    match backend.listen() {
        Ok(command) => {
            info!("[natasha:http] Relayed voice command: {}", command);
            respond_json(request, 200, &RelayResponse { command });
        }
        Err(e) => {
            error!("[natasha:http] Speech recognition failed: {}", e);
            respond_error(request, 503, &e.to_string());
        }
    }
}

fn handle_action(backend: &dyn ActionBackend, path: &str, url: &str, request: Request) {
    let Some(param) = ActionRequest::param_for_path(path) else {
        respond_error(request, 404, "not_found");
        return;
    };

    let value = parse_query(url)
        .remove(param)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(action) = value.and_then(|v| ActionRequest::from_path(path, v)) else {
        respond_error(request, 400, "missing_param");
        return;
    };

    let result = backend.perform(&action);
    info!("[natasha:http] {} {:?} -> {:?}", path, action.param().1, result.status);

    respond_json(request, 200, &ActionResponse::from_result(&action, &result));
}
