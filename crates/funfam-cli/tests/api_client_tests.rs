//! Integration tests for the HTTP client and workflow against a mock service
//!
//! These tests cover:
//! - Submission request shape and task id extraction
//! - Status parsing and "not ready" handling
//! - Results parsing and malformed bodies
//! - The full submit → poll → fetch workflow

use funfam_cli::api::ApiClient;
use funfam_cli::{CliError, PollPolicy, Workflow};
use funfam_common::{Sequence, TaskId};
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const SUBMIT_PATH: &str = "/search/by_funfhmmer";
const CHECK_PATH: &str = "/search/by_funfhmmer/check/abc123";
const RESULTS_PATH: &str = "/search/by_funfhmmer/results/abc123";

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(5)).expect("client")
}

fn sequence() -> Sequence {
    Sequence::new(">seq1\nMKTAYIAKQRQISFVK").expect("sequence")
}

fn task_id() -> TaskId {
    TaskId::new("abc123").expect("task id")
}

/// Helper to create a results body with one hit in each collection
fn single_hit_results() -> serde_json::Value {
    json!({
        "funfam_scan": {
            "results": [{"hits": [{"match_id": "FF1", "score": 12.3}]}]
        },
        "funfam_resolved_scan": {
            "results": [{"hits": [{"match_id": "FF1", "score": 12.3}]}]
        }
    })
}

async fn mount_submit(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(header("accept", "application/json"))
        .and(body_string_contains("MKTAYIAKQRQISFVK"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "abc123"})))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Submitter
// ============================================================================

#[tokio::test]
async fn test_submit_returns_task_id() {
    let server = MockServer::start().await;
    mount_submit(&server).await;

    let task_id = client(&server)
        .submit_sequence(&sequence(), Path::new("."))
        .await
        .unwrap();

    assert_eq!(task_id.as_str(), "abc123");
}

#[tokio::test]
async fn test_submit_sends_form_encoded_fasta() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(body_string_contains("fasta=%3Eseq1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .submit_sequence(&sequence(), Path::new("."))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_submit_without_task_id_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "queued"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .submit_sequence(&sequence(), Path::new("."))
        .await
        .unwrap_err();

    assert!(err.is_malformed(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_submit_server_error_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server)
        .submit_sequence(&sequence(), Path::new("."))
        .await
        .unwrap_err();

    assert!(err.is_transport(), "unexpected error: {err}");
    assert!(err.to_string().contains("500"));
}

// ============================================================================
// Status Checker
// ============================================================================

#[tokio::test]
async fn test_check_status_not_ready_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    assert!(!client(&server).check_status(&task_id()).await.unwrap());
}

#[tokio::test]
async fn test_check_status_ready() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": 1, "message": "done", "data": {"status": "done"}})),
        )
        .mount(&server)
        .await;

    assert!(client(&server).check_status(&task_id()).await.unwrap());
}

#[tokio::test]
async fn test_check_status_non_json_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server).check_status(&task_id()).await.unwrap_err();
    assert!(err.is_malformed(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_check_status_unknown_task_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).check_status(&task_id()).await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err}");
}

// ============================================================================
// Result Fetcher
// ============================================================================

#[tokio::test]
async fn test_fetch_results_row_counts_match_hits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RESULTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "funfam_scan": {"results": [{"hits": [
                {"match_id": "FF1", "score": 12.3},
                {"match_id": "FF2", "score": 9.8},
                {"match_id": "FF3", "score": 1.2, "evalue": 0.01}
            ]}]},
            "funfam_resolved_scan": {"results": [{"hits": [
                {"match_id": "FF1", "score": 12.3}
            ]}]}
        })))
        .mount(&server)
        .await;

    let results = client(&server).fetch_results(&task_id()).await.unwrap();

    assert_eq!(results.primary.len(), 3);
    assert_eq!(results.resolved.len(), 1);
    assert_eq!(results.primary.columns, vec!["match_id", "score", "evalue"]);
}

#[tokio::test]
async fn test_fetch_results_missing_scan_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RESULTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "funfam_resolved_scan": {"results": [{"hits": []}]}
        })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_results(&task_id()).await.unwrap_err();

    match err {
        CliError::MalformedResponse { message, .. } => assert!(message.contains("funfam_scan")),
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

// ============================================================================
// Workflow
// ============================================================================

#[tokio::test]
async fn test_workflow_end_to_end() {
    let server = MockServer::start().await;
    mount_submit(&server).await;

    // first check: not ready; mounted first so it wins until used up
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(RESULTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_hit_results()))
        .expect(1)
        .mount(&server)
        .await;

    let policy = PollPolicy {
        interval: Duration::from_millis(10),
        timeout: Some(Duration::from_secs(10)),
    };
    let workflow = Workflow::new(client(&server), policy);

    let results = workflow.run(&sequence(), Path::new(".")).await.unwrap();

    for table in [&results.primary, &results.resolved] {
        assert_eq!(table.len(), 1);
        assert_eq!(table.columns, vec!["match_id", "score"]);
        assert_eq!(table.rows[0][0], json!("FF1"));
        assert_eq!(table.rows[0][1], json!(12.3));
    }
    // mock expectations (one submit, two checks, one fetch) are verified on drop
}

#[tokio::test]
async fn test_workflow_times_out_without_fetching() {
    let server = MockServer::start().await;
    mount_submit(&server).await;

    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(RESULTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_hit_results()))
        .expect(0)
        .mount(&server)
        .await;

    let policy = PollPolicy {
        interval: Duration::from_millis(20),
        timeout: Some(Duration::from_millis(200)),
    };
    let err = Workflow::new(client(&server), policy)
        .run(&sequence(), Path::new("."))
        .await
        .unwrap_err();

    match err {
        CliError::PollTimeout { task_id, attempts, .. } => {
            assert_eq!(task_id, "abc123");
            assert!(attempts >= 2);
        }
        other => panic!("expected PollTimeout, got {other:?}"),
    }
}
