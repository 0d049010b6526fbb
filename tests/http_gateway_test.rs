//! HTTP tests: HttpGateway against the reference server and raw endpoints.
//!
//! Every server binds an ephemeral port on 127.0.0.1.

mod common;

use std::sync::Arc;

use common::{ScriptedBackend, dispatcher, refused_url, serve_once};
use natasha::gateway::server::GatewayServer;
use natasha::gateway::{ActionGateway, ActionRequest, ActionResult, GatewayError, HttpGateway};
use natasha::{Command, DispatchMode, Intent, Notice};

fn start(backend: Arc<ScriptedBackend>) -> GatewayServer {
    GatewayServer::start("127.0.0.1:0", backend).expect("Failed to start gateway server")
}

#[tokio::test]
async fn test_execute_against_reference_server() {
    let backend = Arc::new(ScriptedBackend::default());
    let server = start(backend.clone());
    let gateway = HttpGateway::new(server.url());

    let result = gateway
        .execute(&ActionRequest::Open {
            app: "browser".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(result, ActionResult::success(Some("browser".to_string())));

    let result = gateway
        .execute(&ActionRequest::PlaySpotify {
            track: "take five & more".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        result,
        ActionResult::success(Some("take five & more".to_string()))
    );

    let result = gateway
        .execute(&ActionRequest::Play {
            media: "unknown".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(result, ActionResult::failure());

    assert_eq!(
        backend.requests(),
        vec![
            ActionRequest::Open {
                app: "browser".to_string()
            },
            ActionRequest::PlaySpotify {
                track: "take five & more".to_string()
            },
            ActionRequest::Play {
                media: "unknown".to_string()
            },
        ]
    );
    server.shutdown();
}

#[tokio::test]
async fn test_relay_command() {
    let server = start(Arc::new(ScriptedBackend {
        transcript: Some("play jazz".to_string()),
        ..Default::default()
    }));
    let gateway = HttpGateway::new(server.url());

    assert_eq!(gateway.relay_command().await.unwrap(), "play jazz");
    server.shutdown();

    let server = start(Arc::new(ScriptedBackend::default()));
    let gateway = HttpGateway::new(server.url());
    assert!(matches!(
        gateway.relay_command().await,
        Err(GatewayError::Status(503))
    ));
    server.shutdown();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let gateway = HttpGateway::new(refused_url());

    let result = gateway
        .execute(&ActionRequest::Search {
            query: "cats".to_string(),
        })
        .await;

    assert!(matches!(result, Err(GatewayError::Transport(_))));
}

#[tokio::test]
async fn test_malformed_json() {
    let (url, handle) = serve_once(200, "<html>not json</html>");
    let gateway = HttpGateway::new(url);

    let result = gateway
        .execute(&ActionRequest::Open {
            app: "browser".to_string(),
        })
        .await;

    assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));
    handle.join().unwrap();
}

#[tokio::test]
async fn test_non_success_status() {
    let (url, handle) = serve_once(500, "{\"status\":\"success\"}");
    let gateway = HttpGateway::new(url);

    let result = gateway
        .execute(&ActionRequest::Play {
            media: "song".to_string(),
        })
        .await;

    assert!(matches!(result, Err(GatewayError::Status(500))));
    handle.join().unwrap();
}

#[tokio::test]
async fn test_unknown_status_is_failure() {
    let (url, handle) = serve_once(200, "{\"status\":\"pending\",\"media\":\"song\"}");
    let gateway = HttpGateway::new(url);

    let result = gateway
        .execute(&ActionRequest::Play {
            media: "song".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result, ActionResult::failure());
    handle.join().unwrap();
}

#[tokio::test]
async fn test_dispatch_end_to_end() {
    let backend = Arc::new(ScriptedBackend::default());
    let server = start(backend.clone());
    let gateway = Arc::new(HttpGateway::new(server.url()));
    let (dispatcher, notifier, _) = dispatcher(gateway, DispatchMode::Relayed);

    let opened = dispatcher
        .dispatch(&Command::new(Intent::Open, "browser"))
        .await;
    let played = dispatcher
        .dispatch(&Command::new(Intent::Play, "some song"))
        .await;
    let searched = dispatcher
        .dispatch(&Command::new(Intent::Search, "for cats"))
        .await;

    assert_eq!(opened, Some(Notice::Opened("browser".to_string())));
    assert_eq!(played, Some(Notice::PlayFailed));
    assert_eq!(searched, Some(Notice::SearchComplete));
    assert_eq!(
        notifier.messages(),
        vec![
            "Opening browser.".to_string(),
            "Could not play the media.".to_string(),
            "Search complete.".to_string(),
        ]
    );
    server.shutdown();
}

#[tokio::test]
async fn test_unreachable_gateway_notifies_failure() {
    let gateway = Arc::new(HttpGateway::new(refused_url()));
    let (dispatcher, notifier, _) = dispatcher(gateway, DispatchMode::Local);

    let notice = dispatcher
        .dispatch(&Command::new(Intent::Open, "browser"))
        .await;

    assert_eq!(notice, Some(Notice::OpenFailed));
    assert_eq!(
        notifier.messages(),
        vec!["Could not open the application.".to_string()]
    );
}
