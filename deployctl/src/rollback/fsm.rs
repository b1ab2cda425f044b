//! Finite State Machine for release rollback

use std::fmt;

use serde::Serialize;

/// Step at which a rollback stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Cluster credentials could not be bound
    Bind,

    /// Release list unavailable or the workload's release is missing
    Release,

    /// History unavailable or no valid target revision
    Resolve,

    /// Operator declined or interrupted the confirmation
    Cancelled,

    /// Release manager rejected the rollback
    RollbackExec,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Bind => "bind",
            Stage::Release => "release",
            Stage::Resolve => "resolve",
            Stage::Cancelled => "cancelled",
            Stage::RollbackExec => "rollback-exec",
        };
        f.write_str(s)
    }
}

/// Rollback state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackState {
    /// Nothing done yet
    Idle,

    /// Cluster credentials written for the target environment
    BoundContext,

    /// Workload release located
    ReleaseFound,

    /// Target revision chosen
    TargetResolved,

    /// Operator agreed (or confirmation was skipped)
    Confirmed,

    /// Release manager accepted the rollback
    RolledBack,

    /// Rollout status observed, verified or not
    Converged,

    /// Final pod snapshot taken
    Done,

    /// Stopped before completion
    Failed(Stage),
}

impl RollbackState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RollbackState::Done | RollbackState::Failed(_))
    }
}

/// Rollback event
#[derive(Debug, Clone)]
pub enum RollbackEvent {
    ContextBound,

    ReleaseMatched { current_revision: u32 },

    TargetResolved(u32),

    Confirmed,

    RollbackApplied,

    /// Rollout finished within the wait bound
    RolloutVerified,

    /// Rollout status could not be confirmed; the rollback stays applied
    RolloutUnverified(String),

    Reported,

    Fail(Stage, String),
}

/// Rollback FSM
#[derive(Debug, Clone)]
pub struct RollbackFsm {
    state: RollbackState,
    current_revision: Option<u32>,
    target_revision: Option<u32>,
    rollback_applied: bool,
    convergence_warning: Option<String>,
    error: Option<String>,
}

impl RollbackFsm {
    /// Create a new FSM in idle state
    pub fn new() -> Self {
        Self {
            state: RollbackState::Idle,
            current_revision: None,
            target_revision: None,
            rollback_applied: false,
            convergence_warning: None,
            error: None,
        }
    }

    pub fn state(&self) -> &RollbackState {
        &self.state
    }

    pub fn current_revision(&self) -> Option<u32> {
        self.current_revision
    }

    pub fn target_revision(&self) -> Option<u32> {
        self.target_revision
    }

    /// Whether the release manager accepted a rollback in this run
    pub fn rollback_applied(&self) -> bool {
        self.rollback_applied
    }

    pub fn convergence_warning(&self) -> Option<&str> {
        self.convergence_warning.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: RollbackEvent) -> Result<(), String> {
        let new_state = match (&self.state, &event) {
            (RollbackState::Idle, RollbackEvent::ContextBound) => RollbackState::BoundContext,

            (RollbackState::BoundContext, RollbackEvent::ReleaseMatched { current_revision }) => {
                self.current_revision = Some(*current_revision);
                RollbackState::ReleaseFound
            }

            (RollbackState::ReleaseFound, RollbackEvent::TargetResolved(revision)) => {
                self.target_revision = Some(*revision);
                RollbackState::TargetResolved
            }

            (RollbackState::TargetResolved, RollbackEvent::Confirmed) => RollbackState::Confirmed,

            (RollbackState::Confirmed, RollbackEvent::RollbackApplied) => {
                self.rollback_applied = true;
                RollbackState::RolledBack
            }

            (RollbackState::RolledBack, RollbackEvent::RolloutVerified) => RollbackState::Converged,
            (RollbackState::RolledBack, RollbackEvent::RolloutUnverified(reason)) => {
                self.convergence_warning = Some(reason.clone());
                RollbackState::Converged
            }

            (RollbackState::Converged, RollbackEvent::Reported) => RollbackState::Done,

            // Any unfinished run can fail
            (state, RollbackEvent::Fail(stage, reason)) if !state.is_terminal() => {
                self.error = Some(reason.clone());
                RollbackState::Failed(*stage)
            }

            // Invalid transitions
            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(())
    }
}

impl Default for RollbackFsm {
    fn default() -> Self {
        Self::new()
    }
}
