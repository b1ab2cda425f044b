//! Release manager queries and rollback

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::{InspectError, RollbackExecError};
use crate::exec::runner::{CommandRunner, Invocation};
use crate::models::release::{Release, RevisionRecord};

fn parse_json_array<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, InspectError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(body).map_err(InspectError::ParseFailure)
}

/// Parse a `helm list -o json` body
pub fn parse_releases(body: &[u8]) -> Result<Vec<Release>, InspectError> {
    parse_json_array(body)
}

/// Parse a `helm history -o json` body
pub fn parse_history(body: &[u8]) -> Result<Vec<RevisionRecord>, InspectError> {
    parse_json_array(body)
}

/// Reads release state from the release manager and applies rollbacks
pub struct ReleaseInspector {
    runner: Arc<dyn CommandRunner>,
}

impl ReleaseInspector {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub async fn list_releases(&self, namespace: &str) -> Result<Vec<Release>, InspectError> {
        let invocation = Invocation::new("helm", ["list", "-n", namespace, "-o", "json"]);
        let body = self.runner.run_json(&invocation).await?;
        let releases = parse_releases(&body)?;
        debug!(namespace, count = releases.len(), "releases listed");
        Ok(releases)
    }

    pub async fn get_history(
        &self,
        release_name: &str,
        namespace: &str,
    ) -> Result<Vec<RevisionRecord>, InspectError> {
        let invocation = Invocation::new(
            "helm",
            ["history", release_name, "-n", namespace, "-o", "json"],
        );
        let body = self.runner.run_json(&invocation).await?;
        let history = parse_history(&body)?;
        debug!(release = release_name, entries = history.len(), "history fetched");
        Ok(history)
    }

    pub async fn rollback(
        &self,
        release_name: &str,
        revision: u32,
        namespace: &str,
    ) -> Result<(), RollbackExecError> {
        let invocation = Invocation::new(
            "helm",
            [
                "rollback".to_string(),
                release_name.to_string(),
                revision.to_string(),
                "-n".to_string(),
                namespace.to_string(),
            ],
        );
        self.runner
            .run(&invocation)
            .await
            .map_err(|source| RollbackExecError {
                release: release_name.to_string(),
                revision,
                source,
            })?;
        info!(release = release_name, revision, namespace, "rollback applied");
        Ok(())
    }
}
