//! End-to-end tests for request dispatch against a mock HTTP backend.
//!
//! Each test stands up a wiremock server so the full dispatch path (spawn,
//! race against cancellation, settle over the event channel) is exercised
//! without a real backend. Settlement events are received on the test
//! thread, outside the runtime, exactly as the UI thread receives them.

use crossbeam_channel::{unbounded, Receiver};
use novadesk::api::AssistantClient;
use novadesk::dispatch::{CommandPayload, DispatchEvent, DispatchOutcome, Dispatcher};
use serde_json::json;
use std::thread;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay long enough that a response can only settle through cancellation.
const STALL: Duration = Duration::from_secs(30);

fn dispatcher_for(
    url: &str,
    runtime: &tokio::runtime::Runtime,
) -> (Dispatcher, Receiver<DispatchEvent>) {
    let (tx, rx) = unbounded();
    let dispatcher = Dispatcher::new(AssistantClient::new(url), runtime.handle().clone(), tx);
    (dispatcher, rx)
}

#[test]
fn test_manual_command_settles_with_response() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/command"))
            .and(body_json(json!({ "command": "what time is it" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": "It is 3 PM",
                "command": "what time is it"
            })))
            .expect(1)
            .mount(&server)
            .await;
        server
    });
    let (mut dispatcher, rx) = dispatcher_for(&server.uri(), &runtime);

    let id = dispatcher
        .dispatch(CommandPayload::Manual("what time is it".into()))
        .unwrap();

    let event = rx.recv_timeout(SETTLE_TIMEOUT).unwrap();
    assert_eq!(event.request_id, id);
    match event.outcome {
        DispatchOutcome::Success(response) => {
            assert_eq!(response.result, "It is 3 PM");
            assert_eq!(response.command.as_deref(), Some("what time is it"));
            assert_eq!(response.open_url, None);
        }
        other => panic!("expected success, got {:?}", other),
    }
    assert!(dispatcher.settle(id));
}

#[test]
fn test_voice_command_carries_open_url() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/listen"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": "Opening YouTube",
                "open_url": "https://youtube.com"
            })))
            .expect(1)
            .mount(&server)
            .await;
        server
    });
    let (mut dispatcher, rx) = dispatcher_for(&server.uri(), &runtime);

    let id = dispatcher.dispatch(CommandPayload::Voice).unwrap();

    let event = rx.recv_timeout(SETTLE_TIMEOUT).unwrap();
    assert_eq!(event.request_id, id);
    match event.outcome {
        DispatchOutcome::Success(response) => {
            assert_eq!(response.result, "Opening YouTube");
            assert_eq!(response.open_url.as_deref(), Some("https://youtube.com"));
        }
        other => panic!("expected success, got {:?}", other),
    }
    assert!(dispatcher.settle(id));
}

#[test]
fn test_cancellation_settles_as_canceled() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/listen"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "result": "too late" }))
                    .set_delay(STALL),
            )
            .mount(&server)
            .await;
        server
    });
    let (mut dispatcher, rx) = dispatcher_for(&server.uri(), &runtime);

    let id = dispatcher.dispatch(CommandPayload::Voice).unwrap();
    // Give the request time to reach the server before canceling
    thread::sleep(Duration::from_millis(100));
    assert!(dispatcher.cancel());

    let event = rx.recv_timeout(SETTLE_TIMEOUT).unwrap();
    assert_eq!(event.request_id, id);
    assert!(matches!(event.outcome, DispatchOutcome::Canceled));
    assert!(dispatcher.settle(id));
}

#[test]
fn test_transport_failure_settles_as_failed() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    // Shut the server down before dispatching so the connection is refused
    let dead_url = runtime.block_on(async {
        let server = MockServer::start().await;
        server.uri()
    });
    let (mut dispatcher, rx) = dispatcher_for(&dead_url, &runtime);

    let id = dispatcher
        .dispatch(CommandPayload::Manual("hello".into()))
        .unwrap();

    let event = rx.recv_timeout(SETTLE_TIMEOUT).unwrap();
    assert_eq!(event.request_id, id);
    match event.outcome {
        DispatchOutcome::Failed(detail) => assert!(!detail.is_empty()),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(dispatcher.settle(id));
}

#[test]
fn test_supersede_cancels_predecessor() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/command"))
            .and(body_json(json!({ "command": "first" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "result": "first answer" }))
                    .set_delay(STALL),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/command"))
            .and(body_json(json!({ "command": "second" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "result": "second answer" })),
            )
            .mount(&server)
            .await;
        server
    });
    let (mut dispatcher, rx) = dispatcher_for(&server.uri(), &runtime);

    let first = dispatcher
        .dispatch(CommandPayload::Manual("first".into()))
        .unwrap();
    thread::sleep(Duration::from_millis(100));
    let second = dispatcher
        .dispatch(CommandPayload::Manual("second".into()))
        .unwrap();
    assert_eq!(dispatcher.current_request(), Some(second));

    let mut outcomes = std::collections::HashMap::new();
    for _ in 0..2 {
        let event = rx.recv_timeout(SETTLE_TIMEOUT).unwrap();
        outcomes.insert(event.request_id, event.outcome);
    }

    assert!(matches!(outcomes[&first], DispatchOutcome::Canceled));
    match &outcomes[&second] {
        DispatchOutcome::Success(response) => assert_eq!(response.result, "second answer"),
        other => panic!("expected success, got {:?}", other),
    }

    // Only the newest request may settle; the superseded one is stale
    assert!(!dispatcher.settle(first));
    assert!(dispatcher.settle(second));
}
