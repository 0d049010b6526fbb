//! Voice session tests: recognition failures, overlap rejection, relayed input.

mod common;

use std::sync::Arc;

use tokio::sync::Notify;

use common::{ScriptedGateway, dispatcher};
use natasha::gateway::{ActionRequest, ActionResult};
use natasha::session::{Activation, VoiceSession};
use natasha::voice::{FixedTranscript, RelayedSource};
use natasha::{Command, DispatchMode, Intent, Notice};

#[tokio::test]
async fn test_recognition_failure_skips_dispatch() {
    let gateway = Arc::new(ScriptedGateway::answering(ActionResult::success(None)));
    let (dispatcher, notifier, launcher) = dispatcher(gateway.clone(), DispatchMode::Local);
    let session = VoiceSession::new(Arc::new(FixedTranscript::new("   ")), dispatcher);

    let outcome = session.activate().await;

    assert_eq!(outcome, Activation::RecognitionFailed);
    assert!(gateway.calls().is_empty());
    assert!(launcher.opened().is_empty());
    assert_eq!(
        notifier.messages(),
        vec!["There was an error with the speech recognition.".to_string()]
    );
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_transcript_is_lowercased_before_classification() {
    let gateway = Arc::new(ScriptedGateway::answering(ActionResult::success(None)));
    let (dispatcher, notifier, _) = dispatcher(gateway.clone(), DispatchMode::Local);
    let session = VoiceSession::new(Arc::new(FixedTranscript::new("Open Browser")), dispatcher);

    let outcome = session.activate().await;

    assert_eq!(
        outcome,
        Activation::Dispatched {
            command: Command::new(Intent::Open, "browser"),
            notice: Some(Notice::Opened("browser".to_string())),
        }
    );
    assert_eq!(notifier.messages(), vec!["Opening browser.".to_string()]);
}

#[tokio::test]
async fn test_empty_search_reports_nothing() {
    let gateway = Arc::new(ScriptedGateway::answering(ActionResult::success(None)));
    let (dispatcher, notifier, launcher) = dispatcher(gateway.clone(), DispatchMode::Local);
    let session = VoiceSession::new(Arc::new(FixedTranscript::new("search")), dispatcher);

    let outcome = session.activate().await;

    assert_eq!(
        outcome,
        Activation::Dispatched {
            command: Command::new(Intent::Search, ""),
            notice: None,
        }
    );
    assert!(gateway.calls().is_empty());
    assert!(launcher.opened().is_empty());
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_overlapping_activation_is_rejected() {
    let gate = Arc::new(Notify::new());
    let gateway = Arc::new(
        ScriptedGateway::answering(ActionResult::success(Some("browser".to_string())))
            .gated(gate.clone()),
    );
    let (dispatcher, notifier, _) = dispatcher(gateway.clone(), DispatchMode::Local);
    let session = Arc::new(VoiceSession::new(
        Arc::new(FixedTranscript::new("open browser")),
        dispatcher,
    ));

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.activate().await }
    });

    // Wait until the first activation is parked inside the gateway call
    while gateway.calls().is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(session.is_busy());

    let second = session.activate().await;
    assert_eq!(second, Activation::Rejected);
    assert_eq!(gateway.calls().len(), 1);

    gate.notify_one();
    let first = first.await.unwrap();

    assert!(matches!(first, Activation::Dispatched { .. }));
    assert!(!session.is_busy());
    assert_eq!(
        notifier.messages(),
        vec![
            "Still working on the previous command.".to_string(),
            "Opening browser.".to_string(),
        ]
    );

    // The flag is released, a new activation goes through
    gate.notify_one();
    let third = session.activate().await;
    assert!(matches!(third, Activation::Dispatched { .. }));
}

#[tokio::test]
async fn test_relayed_transcript_and_search() {
    let gateway = Arc::new(
        ScriptedGateway::answering(ActionResult::success(None))
            .with_relayed("Search for rust tutorials"),
    );
    let (dispatcher, notifier, launcher) = dispatcher(gateway.clone(), DispatchMode::Relayed);
    let session = VoiceSession::new(Arc::new(RelayedSource::new(gateway.clone())), dispatcher);

    let outcome = session.activate().await;

    assert_eq!(
        outcome,
        Activation::Dispatched {
            command: Command::new(Intent::Search, "for rust tutorials"),
            notice: Some(Notice::SearchComplete),
        }
    );
    assert_eq!(
        gateway.calls(),
        vec![ActionRequest::Search {
            query: "for rust tutorials".to_string()
        }]
    );
    assert!(launcher.opened().is_empty());
    assert_eq!(notifier.messages(), vec!["Search complete.".to_string()]);
}

#[tokio::test]
async fn test_relay_failure_is_recognition_failure() {
    let gateway = Arc::new(ScriptedGateway::answering(ActionResult::success(None)));
    let (dispatcher, notifier, _) = dispatcher(gateway.clone(), DispatchMode::Relayed);
    let session = VoiceSession::new(Arc::new(RelayedSource::new(gateway.clone())), dispatcher);

    let outcome = session.activate().await;

    assert_eq!(outcome, Activation::RecognitionFailed);
    assert!(gateway.calls().is_empty());
    assert_eq!(notifier.messages().len(), 1);
}
