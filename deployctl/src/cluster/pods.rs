//! Pod discovery

use std::sync::Arc;

use tracing::debug;

use crate::errors::DiscoveryError;
use crate::exec::runner::{CommandRunner, Invocation};
use crate::models::pod::{Pod, PodList};

/// Label selector matching every pod of a workload
pub fn workload_selector(workload: &str) -> String {
    format!("app.kubernetes.io/name={}", workload)
}

/// Parse a `kubectl get pods -o json` body.
///
/// An empty body or an empty `items` list is a valid, empty result.
pub fn parse_pod_list(body: &[u8]) -> Result<Vec<Pod>, DiscoveryError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let list: PodList = serde_json::from_slice(body).map_err(DiscoveryError::ParseFailure)?;
    Ok(list.items.into_iter().map(Pod::from).collect())
}

/// Lists workload pods. Single attempt, no retries.
pub struct PodDiscovery {
    runner: Arc<dyn CommandRunner>,
}

impl PodDiscovery {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub async fn list_pods(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Pod>, DiscoveryError> {
        let invocation = Invocation::new(
            "kubectl",
            ["get", "pods", "-n", namespace, "-l", label_selector, "-o", "json"],
        );
        let body = self.runner.run_json(&invocation).await?;
        let pods = parse_pod_list(&body)?;
        debug!(namespace, count = pods.len(), "pods discovered");
        Ok(pods)
    }
}
