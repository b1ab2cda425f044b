//! Collaborator command runner
//!
//! Every external system (cloud provider, cluster, release manager) is reached
//! through a [`CommandRunner`]. Production uses [`ProcessRunner`], which spawns
//! the real executables; tests substitute canned responses.

use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::ExecError;

/// A single command line to hand to a collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Command runner trait for testability
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion and return captured stdout
    async fn run_json(&self, invocation: &Invocation) -> Result<Vec<u8>, ExecError>;

    /// Run to completion with output passed through to the terminal
    async fn run(&self, invocation: &Invocation) -> Result<(), ExecError>;

    /// Run with output passed through until the command exits or the
    /// operator interrupts it. An interrupt is a clean end, not an error.
    async fn run_streaming(&self, invocation: &Invocation) -> Result<(), ExecError>;
}

/// Runner backed by real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(invocation: &Invocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).kill_on_drop(true);
        command
    }
}

fn spawn_error(invocation: &Invocation, err: std::io::Error) -> ExecError {
    if err.kind() == ErrorKind::NotFound {
        ExecError::NotFound {
            program: invocation.program.clone(),
        }
    } else {
        ExecError::Io {
            command: invocation.to_string(),
            source: err,
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run_json(&self, invocation: &Invocation) -> Result<Vec<u8>, ExecError> {
        debug!("Executing: {}", invocation);
        let output = Self::command(invocation)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| spawn_error(invocation, e))?;

        if !output.status.success() {
            return Err(ExecError::Failed {
                command: invocation.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    async fn run(&self, invocation: &Invocation) -> Result<(), ExecError> {
        debug!("Executing: {}", invocation);
        let status = Self::command(invocation)
            .status()
            .await
            .map_err(|e| spawn_error(invocation, e))?;

        if !status.success() {
            return Err(ExecError::Failed {
                command: invocation.to_string(),
                code: status.code(),
                stderr: String::new(),
            });
        }

        Ok(())
    }

    async fn run_streaming(&self, invocation: &Invocation) -> Result<(), ExecError> {
        debug!("Streaming: {}", invocation);
        let mut child = Self::command(invocation)
            .spawn()
            .map_err(|e| spawn_error(invocation, e))?;

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| spawn_error(invocation, e))?;
                if !status.success() {
                    return Err(ExecError::Failed {
                        command: invocation.to_string(),
                        code: status.code(),
                        stderr: String::new(),
                    });
                }
                Ok(())
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received, stopping {}", invocation.program);
                let _ = child.kill().await;
                Ok(())
            }
        }
    }
}
