//! Rollback orchestration
//!
//! Drives a [`RollbackFsm`] through bind, release lookup, target resolution,
//! confirmation, rollback, rollout wait and final pod snapshot. Every run
//! ends in exactly one [`RollbackReport`].

use std::fmt::Display;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::options::AppOptions;
use crate::cluster::context::ContextBinder;
use crate::cluster::pods::{workload_selector, PodDiscovery};
use crate::cluster::releases::ReleaseInspector;
use crate::cluster::rollout::RolloutWatcher;
use crate::console::{self, Level};
use crate::exec::runner::CommandRunner;
use crate::models::environment::Environment;
use crate::models::release::{Release, RevisionRecord};
use crate::prompt::DecisionSource;
use crate::rollback::fsm::{RollbackEvent, RollbackFsm, Stage};
use crate::rollback::report::{Convergence, PodSnapshot, RollbackReport};
use crate::rollback::resolver::resolve_target;

/// What the operator asked for
#[derive(Debug, Clone)]
pub struct RollbackRequest {
    pub environment: Environment,

    /// Revision to return to; the previous one when absent
    pub explicit_revision: Option<u32>,

    /// Namespace override; defaults to the environment name
    pub namespace: Option<String>,

    /// Skip the interactive confirmation
    pub skip_confirmation: bool,
}

impl RollbackRequest {
    pub fn namespace(&self) -> String {
        self.environment.namespace(self.namespace.as_deref())
    }
}

/// A step that ended the run early
#[derive(Debug)]
struct StepFailure {
    stage: Stage,
    reason: String,
}

impl StepFailure {
    fn new(stage: Stage, reason: impl Display) -> Self {
        Self {
            stage,
            reason: reason.to_string(),
        }
    }
}

fn advance(fsm: &mut RollbackFsm, event: RollbackEvent, stage: Stage) -> Result<(), StepFailure> {
    debug!(from = ?fsm.state(), event = ?event, "rollback transition");
    fsm.process(event).map_err(|e| StepFailure::new(stage, e))
}

/// What the operator sees about the target before confirming
pub fn target_details(target: u32, record: Option<&RevisionRecord>) -> Vec<(Level, String)> {
    let mut lines = vec![(Level::Info, format!("Target revision: {}", target))];
    if let Some(record) = record {
        lines.push((Level::Info, format!("Rolling back to: {}", record.description)));
        let updated = match record.updated_at() {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
            None => record.updated.clone(),
        };
        lines.push((Level::Info, format!("Updated: {}", updated)));
    }
    lines
}

/// Exact-name match; the release list may hold other charts
pub fn find_release<'a>(releases: &'a [Release], name: &str) -> Option<&'a Release> {
    releases.iter().find(|release| release.name == name)
}

/// Rollback orchestrator
pub struct RollbackOrchestrator {
    workload: String,
    binder: ContextBinder,
    pods: PodDiscovery,
    releases: ReleaseInspector,
    rollout: RolloutWatcher,
    decisions: Arc<dyn DecisionSource>,
}

impl RollbackOrchestrator {
    pub fn new(
        options: &AppOptions,
        runner: Arc<dyn CommandRunner>,
        decisions: Arc<dyn DecisionSource>,
    ) -> Self {
        Self {
            workload: options.workload.clone(),
            binder: ContextBinder::new(runner.clone(), &options.cluster_prefix, &options.region),
            pods: PodDiscovery::new(runner.clone()),
            releases: ReleaseInspector::new(runner.clone()),
            rollout: RolloutWatcher::new(runner, options.rollout_timeout),
            decisions,
        }
    }

    /// Run a rollback to completion
    pub async fn run(&self, request: &RollbackRequest) -> RollbackReport {
        let mut fsm = RollbackFsm::new();

        let report = match self.drive(request, &mut fsm).await {
            Ok(report) => report,
            Err(failure) => {
                if let Err(e) = fsm.process(RollbackEvent::Fail(failure.stage, failure.reason.clone())) {
                    warn!("{}", e);
                }
                RollbackReport::Failed {
                    stage: failure.stage,
                    reason: failure.reason,
                }
            }
        };

        info!(
            state = ?fsm.state(),
            rollback_applied = fsm.rollback_applied(),
            "rollback finished"
        );
        report
    }

    async fn drive(
        &self,
        request: &RollbackRequest,
        fsm: &mut RollbackFsm,
    ) -> Result<RollbackReport, StepFailure> {
        let namespace = request.namespace();
        console::info(format!(
            "Initiating rollback for {} in {} environment",
            self.workload, request.environment
        ));

        // 1. Bind cluster credentials
        self.binder
            .bind(request.environment)
            .await
            .map_err(|e| StepFailure::new(Stage::Bind, e))?;
        advance(fsm, RollbackEvent::ContextBound, Stage::Bind)?;

        // 2. Locate the workload's release
        let releases = self
            .releases
            .list_releases(&namespace)
            .await
            .map_err(|e| StepFailure::new(Stage::Release, e))?;
        if releases.is_empty() {
            return Err(StepFailure::new(
                Stage::Release,
                format!("No Helm releases found in namespace {}", namespace),
            ));
        }
        let release = find_release(&releases, &self.workload).ok_or_else(|| {
            StepFailure::new(
                Stage::Release,
                format!("Helm release '{}' not found in namespace {}", self.workload, namespace),
            )
        })?;
        advance(
            fsm,
            RollbackEvent::ReleaseMatched {
                current_revision: release.current_revision,
            },
            Stage::Release,
        )?;
        console::info(format!("Current revision: {}", release.current_revision));

        // 3. Resolve the target revision
        let history = self
            .releases
            .get_history(&release.name, &namespace)
            .await
            .map_err(|e| StepFailure::new(Stage::Resolve, format!("Could not get release history: {}", e)))?;
        let target = resolve_target(&history, request.explicit_revision)
            .map_err(|e| StepFailure::new(Stage::Resolve, e))?;
        advance(fsm, RollbackEvent::TargetResolved(target), Stage::Resolve)?;

        let record = history.iter().find(|record| record.revision == target);
        for (level, line) in target_details(target, record) {
            console::say(level, line);
        }

        // 4. Confirmation gate
        if !request.skip_confirmation && !self.decisions.confirm("Proceed with rollback?").await {
            return Err(StepFailure::new(Stage::Cancelled, "Rollback cancelled"));
        }
        advance(fsm, RollbackEvent::Confirmed, Stage::Cancelled)?;

        // 5. Roll back
        console::info("Executing rollback...");
        self.releases
            .rollback(&release.name, target, &namespace)
            .await
            .map_err(|e| StepFailure::new(Stage::RollbackExec, e))?;
        advance(fsm, RollbackEvent::RollbackApplied, Stage::RollbackExec)?;
        console::success("Rollback initiated successfully");

        // 6. Wait for the rollout; failure here is only a warning
        console::info("Waiting for deployment to be ready...");
        let convergence = match self.rollout.wait(&self.workload, &namespace).await {
            Ok(()) => {
                advance(fsm, RollbackEvent::RolloutVerified, Stage::RollbackExec)?;
                Convergence::Verified
            }
            Err(e) => {
                warn!(namespace = %namespace, "rollout not verified: {}", e);
                advance(fsm, RollbackEvent::RolloutUnverified(e.to_string()), Stage::RollbackExec)?;
                Convergence::Unverified(e.to_string())
            }
        };

        // 7. Final snapshot; a discovery failure only degrades the report
        let final_pods = match self
            .pods
            .list_pods(&namespace, &workload_selector(&self.workload))
            .await
        {
            Ok(pods) => PodSnapshot::Captured(pods),
            Err(e) => {
                warn!(namespace = %namespace, "final pod listing failed: {}", e);
                PodSnapshot::Unavailable(e.to_string())
            }
        };
        advance(fsm, RollbackEvent::Reported, Stage::RollbackExec)?;

        Ok(RollbackReport::Done {
            release: release.name.clone(),
            namespace,
            from_revision: release.current_revision,
            to_revision: target,
            convergence,
            final_pods,
        })
    }
}
