//! Command execution against the real collaborators

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::options::AppOptions;
use crate::errors::OpsError;
use crate::exec::runner::{CommandRunner, ProcessRunner};
use crate::logs::{init_logging, LogLevel, LogOptions};
use crate::logstream::streamer::{LogRequest, LogStreamer};
use crate::prompt::{DecisionSource, TerminalPrompt};
use crate::rollback::orchestrator::{RollbackOrchestrator, RollbackRequest};
use crate::rollback::report::RollbackReport;
use crate::storage::settings::Settings;
use crate::utils::version_info;

/// Diagnostic logging for a run; `verbose` forces debug
pub fn log_options(settings: &Settings, verbose: bool) -> LogOptions {
    LogOptions {
        log_level: if verbose {
            LogLevel::Debug
        } else {
            settings.log_level.clone()
        },
        json_format: settings.log_json,
    }
}

/// Install logging and derive command options from settings
pub fn init(settings: &Settings, verbose: bool) -> Result<AppOptions, OpsError> {
    init_logging(log_options(settings, verbose))?;
    debug!(version = ?version_info(), "starting");
    Ok(AppOptions::from(settings))
}

fn collaborators() -> (Arc<dyn CommandRunner>, Arc<dyn DecisionSource>) {
    (Arc::new(ProcessRunner::new()), Arc::new(TerminalPrompt::new()))
}

/// Run a rollback and print its report
pub async fn rollback(options: &AppOptions, request: RollbackRequest) -> RollbackReport {
    info!(?request, "rollback requested");
    let (runner, decisions) = collaborators();
    let report = RollbackOrchestrator::new(options, runner, decisions)
        .run(&request)
        .await;
    report.emit();
    report
}

/// Fetch or follow workload logs
pub async fn logs(options: &AppOptions, request: LogRequest) -> Result<(), OpsError> {
    info!(?request, "logs requested");
    let (runner, decisions) = collaborators();
    LogStreamer::new(options, runner, decisions)
        .stream(&request)
        .await
}
