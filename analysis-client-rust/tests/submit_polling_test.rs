//! Submission and polling behavior against scripted transports

mod common;

use analysis_client::{AnalysisClient, CancellationToken, ClientError, PollError, PollPolicy};
use common::*;
use contract_auditor_sdk::{AnalysisRequest, AnalyzeResponse, Language, TaskStatusResponse};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn request() -> AnalysisRequest {
    AnalysisRequest::new("contract Vault { function withdraw() public {} }", Language::Solidity)
}

fn client(transport: Arc<ScriptedTransport>, clock: Arc<InstantClock>) -> AnalysisClient {
    AnalysisClient::new(transport).with_clock(clock)
}

#[tokio::test]
async fn test_pending_twice_then_done_polls_exactly_three_times() {
    let expected = sample_result();
    let transport = Arc::new(
        ScriptedTransport::task("task-1")
            .then_pending()
            .then_pending()
            .then_status(Ok(done_with(&expected))),
    );
    let clock = Arc::new(InstantClock::default());

    let result = client(transport.clone(), clock.clone())
        .submit(&request())
        .await
        .unwrap();

    assert_eq!(result, expected);
    assert_eq!(transport.status_calls(), 3, "no fourth poll after a terminal state");
    assert_eq!(clock.sleep_count(), 3);
    assert!(clock
        .sleeps
        .lock()
        .unwrap()
        .iter()
        .all(|d| *d == Duration::from_secs(2)));
}

#[tokio::test]
async fn test_immediate_result_skips_polling() {
    let transport = Arc::new(ScriptedTransport::new(Ok(AnalyzeResponse::Completed(
        sample_result(),
    ))));
    let clock = Arc::new(InstantClock::default());

    let result = client(transport.clone(), clock.clone())
        .submit(&request())
        .await
        .unwrap();

    assert_eq!(result.vulnerabilities().len(), 2);
    assert_eq!(transport.status_calls(), 0);
    assert_eq!(clock.sleep_count(), 0);
}

#[tokio::test]
async fn test_submission_failure_is_network_error() {
    let transport = Arc::new(ScriptedTransport::new(Err(unavailable())));
    let clock = Arc::new(InstantClock::default());

    let err = client(transport.clone(), clock)
        .submit(&request())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(transport.status_calls(), 0);
}

#[tokio::test]
async fn test_transport_failure_during_poll_stops_immediately() {
    let transport = Arc::new(
        ScriptedTransport::task("task-2")
            .then_pending()
            .then_status(Err(unavailable()))
            .then_status(Ok(done_with(&sample_result()))),
    );
    let clock = Arc::new(InstantClock::default());

    let err = client(transport.clone(), clock)
        .submit(&request())
        .await
        .unwrap_err();

    match err {
        ClientError::Poll(PollError::Transport {
            task_id, attempt, ..
        }) => {
            assert_eq!(task_id, "task-2");
            assert_eq!(attempt, 2);
        }
        other => panic!("expected poll transport error, got {:?}", other),
    }
    assert_eq!(transport.status_calls(), 2, "no retry after a transport failure");
}

#[tokio::test]
async fn test_polling_gives_up_after_max_attempts() {
    let transport = Arc::new(ScriptedTransport::task("slow"));
    let clock = Arc::new(InstantClock::default());
    let policy = PollPolicy {
        interval: Duration::from_millis(10),
        max_attempts: 5,
    };

    let err = client(transport.clone(), clock)
        .with_poll_policy(policy)
        .submit(&request())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Poll(PollError::Exhausted { attempts: 5, .. })
    ));
    assert_eq!(transport.abandoned(), vec!["slow".to_string()]);
    assert_eq!(transport.status_calls(), 5);
}

#[tokio::test]
async fn test_failed_task_surfaces_service_message() {
    let transport = Arc::new(ScriptedTransport::task("broken").then_status(Ok(
        TaskStatusResponse {
            state: "FAILURE".to_string(),
            result: Some(json!("Unsupported language: cairo")),
        },
    )));
    let clock = Arc::new(InstantClock::default());

    let err = client(transport, clock).submit(&request()).await.unwrap_err();

    match err {
        ClientError::Poll(PollError::TaskFailed { message, .. }) => {
            assert_eq!(message, "Unsupported language: cairo");
        }
        other => panic!("expected task failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_done_state_with_garbage_payload_is_malformed() {
    let transport = Arc::new(ScriptedTransport::task("odd").then_status(Ok(
        TaskStatusResponse {
            state: "SUCCESS".to_string(),
            result: Some(json!({"unexpected": true})),
        },
    )));
    let clock = Arc::new(InstantClock::default());

    let err = client(transport, clock).submit(&request()).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Poll(PollError::MalformedResult { .. })
    ));
}

#[tokio::test]
async fn test_cancelled_token_stops_before_polling() {
    let transport = Arc::new(ScriptedTransport::task("forever"));
    let clock = Arc::new(InstantClock::default());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client(transport.clone(), clock)
        .submit_cancellable(&request(), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(transport.status_calls(), 0);
}

#[tokio::test]
async fn test_cancel_while_submission_hangs() {
    let client = AnalysisClient::new(Arc::new(HungTransport))
        .with_clock(Arc::new(InstantClock::default()));
    let cancel = CancellationToken::new();

    let token = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();
    });

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        client.submit_cancellable(&request(), &cancel),
    )
    .await
    .expect("cancellation must end a hung submission");

    assert!(matches!(outcome, Err(ClientError::Cancelled)));
}

#[tokio::test]
async fn test_cancel_after_pending_polls_stops_polling() {
    let transport = Arc::new(
        ScriptedTransport::task("slow")
            .then_pending()
            .then_pending()
            .then_pending(),
    );
    let cancel = CancellationToken::new();
    // Two polls complete; the third wait fires the token
    let clock = Arc::new(CancellingClock::new(cancel.clone(), 3));

    let err = AnalysisClient::new(transport.clone())
        .with_clock(clock)
        .submit_cancellable(&request(), &cancel)
        .await
        .unwrap_err();

    match err {
        ClientError::Poll(poll_error @ PollError::Cancelled { .. }) => {
            assert_eq!(poll_error.task_id(), "slow");
        }
        other => panic!("expected cancellation while polling, got {:?}", other),
    }
    assert_eq!(transport.status_calls(), 2);
    assert_eq!(transport.abandoned(), vec!["slow".to_string()]);

    tokio::task::yield_now().await;
    assert_eq!(transport.status_calls(), 2, "no polls after cancellation");
}

#[tokio::test]
async fn test_history_and_remote_export_pass_through() {
    let transport = Arc::new(ScriptedTransport::new(Ok(AnalyzeResponse::Completed(
        sample_result(),
    ))));
    let clock = Arc::new(InstantClock::default());
    let client = client(transport.clone(), clock);

    let history = client.history().await.unwrap();
    assert_eq!(history.len(), 1);

    let bytes = client
        .export_remote(&history[0], contract_auditor_sdk::ExportFormat::Csv)
        .await
        .unwrap();
    assert_eq!(bytes, b"exported");
}
