//! deployctl - Entry Point
//!
//! Operator CLI for tailing workload logs and rolling back its Helm release
//! in the dev, stage and prod clusters.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use deployctl::app::run;
use deployctl::console;
use deployctl::logstream::streamer::LogRequest;
use deployctl::models::environment::Environment;
use deployctl::rollback::orchestrator::RollbackRequest;
use deployctl::storage::settings::Settings;
use deployctl::utils::LONG_VERSION;

#[derive(Parser)]
#[command(
    name = "deployctl",
    about = "Log tailing and Helm rollbacks across environments",
    version,
    long_version = LONG_VERSION,
    after_help = "Examples:\n  \
        deployctl logs --environment dev --follow\n  \
        deployctl logs --environment prod --lines 50\n  \
        deployctl rollback --environment stage\n  \
        deployctl rollback --environment prod --revision 3 --confirm"
)]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true, env = "DEPLOYCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Debug-level diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tail application logs
    Logs {
        /// Target environment
        #[arg(short, long, value_enum)]
        environment: Environment,

        /// Follow log output
        #[arg(short, long)]
        follow: bool,

        /// Number of lines to show (default: 100)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        lines: Option<u32>,

        /// Specific pod name
        #[arg(short, long)]
        pod: Option<String>,

        /// Kubernetes namespace (defaults to environment)
        #[arg(short, long)]
        namespace: Option<String>,
    },
    /// Rollback Helm release
    Rollback {
        /// Target environment
        #[arg(short, long, value_enum)]
        environment: Environment,

        /// Specific revision to rollback to
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        revision: Option<u32>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        confirm: bool,

        /// Kubernetes namespace (defaults to environment)
        #[arg(short, long)]
        namespace: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()).await {
        Ok(settings) => settings,
        Err(e) => {
            console::error(e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let options = match run::init(&settings, cli.verbose) {
        Ok(options) => options,
        Err(e) => {
            console::error(format!("Failed to initialize logging: {}", e));
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Logs {
            environment,
            follow,
            lines,
            pod,
            namespace,
        } => {
            let request = LogRequest {
                environment,
                namespace,
                pod,
                follow,
                lines: lines.unwrap_or(options.default_log_lines),
            };
            match run::logs(&options, request).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) if e.is_cancellation() => {
                    console::warning("Operation cancelled");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("logs failed: {:?}", e);
                    console::error(e.to_string());
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Rollback {
            environment,
            revision,
            confirm,
            namespace,
        } => {
            let request = RollbackRequest {
                environment,
                explicit_revision: revision,
                namespace,
                skip_confirmation: confirm,
            };
            let report = run::rollback(&options, request).await;
            ExitCode::from(report.exit_code())
        }
    }
}
