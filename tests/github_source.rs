mod common;
use crate::common::{init_tracing, with_timeout};

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use waitgate::condition::job::evaluate_job;
use waitgate::condition::{Evaluator, RemoteRun};
use waitgate::engine::{wait_for, PollStatus};
use waitgate::errors::WaitgateError;
use waitgate::fs::mock::MockFileSystem;
use waitgate::source::github::DEFAULT_REQUEST_TIMEOUT;
use waitgate::source::{GitHubRunSource, RunSource};
use waitgate::types::{JobStatus, RunContext};
use waitgate_test_utils::builders::ConditionConfigBuilder;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JOBS_PATH: &str = "/repos/acme/widgets/actions/runs/77/jobs";
const ARTIFACTS_PATH: &str = "/repos/acme/widgets/actions/runs/77/artifacts";

fn run() -> RunContext {
    RunContext::from_slug("acme/widgets", 77).unwrap()
}

#[tokio::test]
async fn jobs_are_fetched_across_pages() {
    with_timeout(async {
        init_tracing();
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(JOBS_PATH))
            .and(query_param("filter", "latest"))
            .and(query_param("page", "1"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 3,
                "jobs": [
                    {"id": 1, "name": "test (node-16)", "status": "completed", "conclusion": "success"},
                    {"id": 2, "name": "test (node-18)", "status": "in_progress", "conclusion": null}
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(JOBS_PATH))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 3,
                "jobs": [
                    {"id": 3, "name": "build", "status": "queued", "conclusion": null}
                ]
            })))
            .mount(&server)
            .await;

        let source = GitHubRunSource::new(&server.uri(), Some("s3cret".to_string()), DEFAULT_REQUEST_TIMEOUT).unwrap();
        let jobs = source.list_jobs(&run()).await.unwrap();

        let names: Vec<&str> = jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["test (node-16)", "test (node-18)", "build"]);
        assert_eq!(jobs[1].status, JobStatus::InProgress);
        assert_eq!(jobs[2].status, JobStatus::Queued);
    })
    .await
}

#[tokio::test]
async fn server_errors_surface_status_and_body() {
    with_timeout(async {
        init_tracing();
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ARTIFACTS_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let source = GitHubRunSource::new(&server.uri(), None, DEFAULT_REQUEST_TIMEOUT).unwrap();
        match source.list_artifacts(&run()).await {
            Err(WaitgateError::Http(msg)) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("upstream exploded"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    })
    .await
}

#[tokio::test]
async fn empty_artifact_listing_stops_after_one_page() {
    with_timeout(async {
        init_tracing();
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ARTIFACTS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"total_count": 0, "artifacts": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let source = GitHubRunSource::new(&server.uri(), None, DEFAULT_REQUEST_TIMEOUT).unwrap();
        let artifacts = source.list_artifacts(&run()).await.unwrap();
        assert!(artifacts.is_empty());
    })
    .await
}

#[tokio::test]
async fn job_evaluation_over_http() {
    with_timeout(async {
        init_tracing();
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(JOBS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 2,
                "jobs": [
                    {"name": "e2e-chrome", "status": "completed", "conclusion": "success"},
                    {"name": "e2e-firefox", "status": "completed", "conclusion": "timed_out"}
                ]
            })))
            .mount(&server)
            .await;

        let source = GitHubRunSource::new(&server.uri(), None, DEFAULT_REQUEST_TIMEOUT).unwrap();
        let eval = evaluate_job(&source, &run(), "e2e").await;

        assert!(eval.met);
        assert!(!eval.all_succeeded);
        assert_eq!(eval.message, "Jobs completed with failures: e2e-firefox (timed_out)");
    })
    .await
}

#[tokio::test]
async fn stalled_registry_cannot_hold_the_wait_past_its_deadline() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(JOBS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"total_count": 0, "jobs": []}))
                .set_delay(Duration::from_secs(8)),
        )
        .mount(&server)
        .await;

    let source = GitHubRunSource::new(&server.uri(), None, DEFAULT_REQUEST_TIMEOUT).unwrap();
    let cfg = ConditionConfigBuilder::job("test").timeout(1).poll_interval(1).build();
    let remote = RemoteRun {
        source: Arc::new(source),
        run: run(),
    };
    let evaluator = Evaluator::new(&cfg, Arc::new(MockFileSystem::new()), Some(remote)).unwrap();

    let started = Instant::now();
    let outcome = wait_for(&cfg, evaluator).await;

    assert_eq!(outcome.status, PollStatus::Timeout);
    assert!(started.elapsed() <= Duration::from_secs(3), "took {:?}", started.elapsed());
}

#[tokio::test]
async fn slow_response_becomes_a_request_error() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(JOBS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"total_count": 0, "jobs": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let source =
        GitHubRunSource::new(&server.uri(), None, Duration::from_millis(200)).unwrap();
    match source.list_jobs(&run()).await {
        Err(WaitgateError::Http(_)) => {}
        other => panic!("expected Http error, got {other:?}"),
    }
}
