//! Log streamer tests

use std::sync::Arc;

use deployctl::errors::{DiscoveryError, OpsError, PromptError};
use deployctl::logstream::streamer::{LogRequest, LogStreamer};
use deployctl::models::environment::Environment;

use crate::common::{options, shared, Mode, Reply, ScriptedDecisions, ScriptedRunner, NO_PODS, ONE_POD, THREE_PODS};

fn request(pod: Option<&str>, follow: bool) -> LogRequest {
    LogRequest {
        environment: Environment::Stage,
        namespace: None,
        pod: pod.map(str::to_string),
        follow,
        lines: 100,
    }
}

async fn stream(
    runner: &Arc<ScriptedRunner>,
    decisions: &Arc<ScriptedDecisions>,
    request: LogRequest,
) -> Result<(), OpsError> {
    LogStreamer::new(&options(), shared(runner), decisions.clone())
        .stream(&request)
        .await
}

#[tokio::test]
async fn test_disambiguation_selects_indexed_pod() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .on("kubectl get pods", Reply::json(THREE_PODS))
            .on("kubectl logs", Reply::json("line one\nline two\n")),
    );
    let decisions = Arc::new(ScriptedDecisions::selecting(Ok(1)));

    stream(&runner, &decisions, request(None, false)).await.unwrap();

    assert_eq!(decisions.offered(), vec![3]);
    assert_eq!(
        runner.calls().last().map(String::as_str),
        Some("kubectl logs sample-app-5f7c9-bbbbb -n stage --tail 100")
    );
}

#[tokio::test]
async fn test_single_pod_is_selected_without_prompt() {
    let runner = Arc::new(ScriptedRunner::new().on("kubectl get pods", Reply::json(ONE_POD)));
    let decisions = Arc::new(ScriptedDecisions::selecting(Ok(0)));

    stream(&runner, &decisions, request(None, false)).await.unwrap();

    assert!(decisions.offered().is_empty());
    assert!(runner.called("kubectl logs sample-app-5f7c9-aaaaa -n stage"));
}

#[tokio::test]
async fn test_no_pods_is_an_error() {
    let runner = Arc::new(ScriptedRunner::new().on("kubectl get pods", Reply::json(NO_PODS)));
    let decisions = Arc::new(ScriptedDecisions::selecting(Ok(0)));

    let err = stream(&runner, &decisions, request(None, false)).await.unwrap_err();

    assert!(matches!(err, OpsError::NoPods(ref ns) if ns == "stage"), "{:?}", err);
    assert!(!runner.called("kubectl logs"));
}

#[tokio::test]
async fn test_out_of_range_selection() {
    let runner = Arc::new(ScriptedRunner::new().on("kubectl get pods", Reply::json(THREE_PODS)));
    let decisions = Arc::new(ScriptedDecisions::selecting(Ok(3)));

    let err = stream(&runner, &decisions, request(None, false)).await.unwrap_err();

    assert!(matches!(err, OpsError::Prompt(PromptError::Invalid(_))), "{:?}", err);
    assert!(!err.is_cancellation());
    assert!(!runner.called("kubectl logs"));
}

#[tokio::test]
async fn test_interrupted_selection_is_cancellation() {
    let runner = Arc::new(ScriptedRunner::new().on("kubectl get pods", Reply::json(THREE_PODS)));
    let decisions = Arc::new(ScriptedDecisions::selecting(Err(PromptError::Cancelled)));

    let err = stream(&runner, &decisions, request(None, false)).await.unwrap_err();

    assert!(err.is_cancellation());
    assert!(!runner.called("kubectl logs"));
}

#[tokio::test]
async fn test_explicit_pod_skips_discovery() {
    let runner = Arc::new(ScriptedRunner::new());
    let decisions = Arc::new(ScriptedDecisions::selecting(Ok(0)));

    stream(&runner, &decisions, request(Some("sample-app-manual"), false))
        .await
        .unwrap();

    assert!(!runner.called("kubectl get pods"));
    assert_eq!(
        runner.calls(),
        vec![
            "aws eks update-kubeconfig --region us-west-2 --name demo-eks-stage",
            "kubectl logs sample-app-manual -n stage --tail 100",
        ]
    );
}

#[tokio::test]
async fn test_follow_streams() {
    let runner = Arc::new(ScriptedRunner::new());
    let decisions = Arc::new(ScriptedDecisions::selecting(Ok(0)));
    let mut follow = request(Some("sample-app-manual"), true);
    follow.lines = 20;
    follow.namespace = Some("batch".to_string());

    stream(&runner, &decisions, follow).await.unwrap();

    assert_eq!(
        runner.calls_with_mode().last().cloned(),
        Some((
            Mode::Streaming,
            "kubectl logs sample-app-manual -n batch --tail 20 -f".to_string()
        ))
    );
}

#[tokio::test]
async fn test_bind_failure_stops_before_discovery() {
    let runner = Arc::new(
        ScriptedRunner::new().on("aws eks", Reply::Fail("ExpiredToken".to_string())),
    );
    let decisions = Arc::new(ScriptedDecisions::selecting(Ok(0)));

    let err = stream(&runner, &decisions, request(None, false)).await.unwrap_err();

    assert!(matches!(err, OpsError::Bind(_)), "{:?}", err);
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn test_malformed_pod_list() {
    let runner = Arc::new(ScriptedRunner::new().on("kubectl get pods", Reply::json("<html>")));
    let decisions = Arc::new(ScriptedDecisions::selecting(Ok(0)));

    let err = stream(&runner, &decisions, request(None, false)).await.unwrap_err();

    assert!(
        matches!(err, OpsError::Discovery(DiscoveryError::ParseFailure(_))),
        "{:?}",
        err
    );
}
