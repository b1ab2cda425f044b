//! Cluster credential binding

use std::sync::Arc;

use tracing::info;

use crate::errors::BindError;
use crate::exec::runner::{CommandRunner, Invocation};
use crate::models::environment::Environment;

/// Writes local cluster credentials for an environment's cluster.
///
/// Binding mutates the operator's kubeconfig. Every operation binds first
/// instead of trusting whatever context an earlier run left behind.
pub struct ContextBinder {
    runner: Arc<dyn CommandRunner>,
    cluster_prefix: String,
    region: String,
}

impl ContextBinder {
    pub fn new(runner: Arc<dyn CommandRunner>, cluster_prefix: &str, region: &str) -> Self {
        Self {
            runner,
            cluster_prefix: cluster_prefix.to_string(),
            region: region.to_string(),
        }
    }

    pub fn invocation(&self, environment: Environment) -> Invocation {
        Invocation::new(
            "aws",
            [
                "eks".to_string(),
                "update-kubeconfig".to_string(),
                "--region".to_string(),
                self.region.clone(),
                "--name".to_string(),
                environment.cluster_name(&self.cluster_prefix),
            ],
        )
    }

    pub async fn bind(&self, environment: Environment) -> Result<(), BindError> {
        let cluster = environment.cluster_name(&self.cluster_prefix);
        self.runner
            .run(&self.invocation(environment))
            .await
            .map_err(|source| BindError {
                cluster: cluster.clone(),
                source,
            })?;
        info!(cluster = %cluster, region = %self.region, "cluster context bound");
        Ok(())
    }
}
