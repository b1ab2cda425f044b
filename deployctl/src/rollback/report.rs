//! Terminal rollback report

use serde::Serialize;

use crate::console::{self, Level};
use crate::models::pod::Pod;
use crate::rollback::fsm::Stage;

/// Whether the cluster confirmed the rollout after the rollback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum Convergence {
    Verified,
    Unverified(String),
}

/// Pods observed after the rollback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum PodSnapshot {
    Captured(Vec<Pod>),
    Unavailable(String),
}

/// The single outcome of a rollback run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum RollbackReport {
    Done {
        release: String,
        namespace: String,
        from_revision: u32,
        to_revision: u32,
        convergence: Convergence,
        final_pods: PodSnapshot,
    },
    Failed {
        stage: Stage,
        reason: String,
    },
}

impl RollbackReport {
    pub fn is_done(&self) -> bool {
        matches!(self, RollbackReport::Done { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            RollbackReport::Failed {
                stage: Stage::Cancelled,
                ..
            }
        )
    }

    /// Process exit code: cancellation is not an error
    pub fn exit_code(&self) -> u8 {
        match self {
            RollbackReport::Done { .. } => 0,
            RollbackReport::Failed { stage: Stage::Cancelled, .. } => 0,
            RollbackReport::Failed { .. } => 1,
        }
    }

    /// Leveled operator lines describing the outcome
    pub fn lines(&self) -> Vec<(Level, String)> {
        let mut lines = Vec::new();
        match self {
            RollbackReport::Done {
                release,
                namespace,
                from_revision,
                to_revision,
                convergence,
                final_pods,
            } => {
                match convergence {
                    Convergence::Verified => lines.push((
                        Level::Success,
                        format!(
                            "Rollback completed successfully: {} in {} moved from revision {} to {}",
                            release, namespace, from_revision, to_revision
                        ),
                    )),
                    Convergence::Unverified(reason) => {
                        lines.push((
                            Level::Warning,
                            "Rollback may have failed - check deployment status".to_string(),
                        ));
                        lines.push((Level::Warning, format!("Rollout not verified: {}", reason)));
                    }
                }
                match final_pods {
                    PodSnapshot::Captured(pods) if pods.is_empty() => lines.push((
                        Level::Warning,
                        "No pods currently match the workload".to_string(),
                    )),
                    PodSnapshot::Captured(pods) => {
                        lines.push((Level::Info, "Current pods:".to_string()));
                        for pod in pods {
                            lines.push((Level::Info, format!("  {}: {}", pod.name, pod.phase)));
                        }
                    }
                    PodSnapshot::Unavailable(reason) => lines.push((
                        Level::Warning,
                        format!("Could not list current pods: {}", reason),
                    )),
                }
            }
            RollbackReport::Failed {
                stage: Stage::Cancelled,
                reason,
            } => lines.push((Level::Warning, reason.clone())),
            RollbackReport::Failed { stage, reason } => lines.push((
                Level::Error,
                format!("Rollback failed at {}: {}", stage, reason),
            )),
        }
        lines
    }

    /// Print the report to the operator
    pub fn emit(&self) {
        for (level, line) in self.lines() {
            console::say(level, line);
        }
    }
}
