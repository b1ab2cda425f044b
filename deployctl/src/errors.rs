//! Error types for deployctl
//!
//! One enum per collaborator-facing component, plus [`OpsError`] which the
//! entry point works with.

use thiserror::Error;

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Failure of a single collaborator command
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Command not found: {program}")]
    NotFound { program: String },

    #[error("Command `{command}` exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("IO error running `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// The cloud-provider context could not be bound
#[derive(Error, Debug)]
#[error("Failed to bind cluster context for {cluster}: {source}")]
pub struct BindError {
    pub cluster: String,
    #[source]
    pub source: ExecError,
}

/// Pod discovery failures
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Cluster unreachable: {0}")]
    Unreachable(#[from] ExecError),

    #[error("Failed to parse pod information: {0}")]
    ParseFailure(#[source] serde_json::Error),
}

/// Release manager query failures
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Release manager unreachable: {0}")]
    Unreachable(#[from] ExecError),

    #[error("Failed to parse release manager output: {0}")]
    ParseFailure(#[source] serde_json::Error),
}

/// The rollback target could not be determined
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No previous revisions available for rollback")]
    NoPriorRevision,

    #[error("Revision {requested} not found. Available: {available:?}")]
    UnknownRevision { requested: u32, available: Vec<u32> },

    #[error("Release history lists revision {0} more than once")]
    DuplicateRevision(u32),
}

/// The release manager rejected the rollback
#[derive(Error, Debug)]
#[error("Rollback of {release} to revision {revision} failed: {source}")]
pub struct RollbackExecError {
    pub release: String,
    pub revision: u32,
    #[source]
    pub source: ExecError,
}

/// Outcome of an interactive decision that did not produce a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Invalid selection: {0}")]
    Invalid(String),
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum OpsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Inspect(#[from] InspectError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Rollback(#[from] RollbackExecError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("No pods found in namespace {0}")]
    NoPods(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl OpsError {
    /// True when the user backed out rather than something going wrong
    pub fn is_cancellation(&self) -> bool {
        matches!(self, OpsError::Prompt(PromptError::Cancelled))
    }
}
