//! Rollout convergence

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::errors::ExecError;
use crate::exec::runner::{CommandRunner, Invocation};

/// Waits on the cluster's own rollout status for a deployment.
///
/// The wait is one blocking call; the timeout is enforced by the cluster
/// tool, not by re-polling here.
pub struct RolloutWatcher {
    runner: Arc<dyn CommandRunner>,
    timeout: Duration,
}

impl RolloutWatcher {
    pub fn new(runner: Arc<dyn CommandRunner>, timeout: Duration) -> Self {
        Self { runner, timeout }
    }

    pub fn invocation(&self, deployment: &str, namespace: &str) -> Invocation {
        Invocation::new(
            "kubectl",
            [
                "rollout".to_string(),
                "status".to_string(),
                format!("deployment/{}", deployment),
                "-n".to_string(),
                namespace.to_string(),
                format!("--timeout={}s", self.timeout.as_secs()),
            ],
        )
    }

    pub async fn wait(&self, deployment: &str, namespace: &str) -> Result<(), ExecError> {
        debug!(deployment, namespace, timeout_secs = self.timeout.as_secs(), "waiting for rollout");
        self.runner.run(&self.invocation(deployment, namespace)).await
    }
}
