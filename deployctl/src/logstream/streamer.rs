//! Log streamer
//!
//! Binds the environment's cluster, settles on exactly one pod, then either
//! prints a bounded tail or follows the log until the operator interrupts.

use std::io::Write;
use std::sync::Arc;

use tracing::debug;

use crate::app::options::AppOptions;
use crate::cluster::context::ContextBinder;
use crate::cluster::pods::{workload_selector, PodDiscovery};
use crate::console;
use crate::errors::{OpsError, PromptError};
use crate::exec::runner::{CommandRunner, Invocation};
use crate::models::environment::Environment;
use crate::models::pod::Pod;
use crate::prompt::DecisionSource;

/// What the operator asked for
#[derive(Debug, Clone)]
pub struct LogRequest {
    pub environment: Environment,

    /// Namespace override; defaults to the environment name
    pub namespace: Option<String>,

    /// Pod to read; discovered when absent
    pub pod: Option<String>,

    /// Stream until interrupted instead of printing a tail
    pub follow: bool,

    /// Tail length
    pub lines: u32,
}

impl LogRequest {
    pub fn namespace(&self) -> String {
        self.environment.namespace(self.namespace.as_deref())
    }
}

/// `kubectl logs` command line
pub fn log_invocation(pod: &str, namespace: &str, lines: u32, follow: bool) -> Invocation {
    let invocation = Invocation::new(
        "kubectl",
        [
            "logs".to_string(),
            pod.to_string(),
            "-n".to_string(),
            namespace.to_string(),
            "--tail".to_string(),
            lines.to_string(),
        ],
    );
    if follow {
        invocation.arg("-f")
    } else {
        invocation
    }
}

/// Log streamer
pub struct LogStreamer {
    workload: String,
    binder: ContextBinder,
    pods: PodDiscovery,
    runner: Arc<dyn CommandRunner>,
    decisions: Arc<dyn DecisionSource>,
}

impl LogStreamer {
    pub fn new(
        options: &AppOptions,
        runner: Arc<dyn CommandRunner>,
        decisions: Arc<dyn DecisionSource>,
    ) -> Self {
        Self {
            workload: options.workload.clone(),
            binder: ContextBinder::new(runner.clone(), &options.cluster_prefix, &options.region),
            pods: PodDiscovery::new(runner.clone()),
            runner,
            decisions,
        }
    }

    /// Resolve the pod to read. Zero pods is an error, one is used as is,
    /// several go to the decision source.
    pub async fn choose_pod(&self, pods: &[Pod], namespace: &str) -> Result<String, OpsError> {
        match pods {
            [] => Err(OpsError::NoPods(namespace.to_string())),
            [only] => {
                console::info(format!("Using pod: {}", only.name));
                Ok(only.name.clone())
            }
            _ => {
                console::info("Multiple pods found:");
                for (index, pod) in pods.iter().enumerate() {
                    console::info(format!("  {}: {} ({})", index, pod.name, pod.phase));
                }
                let index = self.decisions.select_index(pods.len()).await?;
                let pod = pods.get(index).ok_or_else(|| {
                    PromptError::Invalid(format!(
                        "{} is out of range (0-{})",
                        index,
                        pods.len() - 1
                    ))
                })?;
                debug!(index, pod = %pod.name, "pod selected");
                Ok(pod.name.clone())
            }
        }
    }

    /// Print or follow logs. Blocks until done; in follow mode that is when
    /// the command exits or the operator interrupts.
    pub async fn stream(&self, request: &LogRequest) -> Result<(), OpsError> {
        let namespace = request.namespace();
        console::info(format!(
            "Tailing logs for {} in {} environment",
            self.workload, request.environment
        ));

        self.binder.bind(request.environment).await?;

        let pod = match &request.pod {
            Some(pod) => pod.clone(),
            None => {
                let pods = self
                    .pods
                    .list_pods(&namespace, &workload_selector(&self.workload))
                    .await?;
                self.choose_pod(&pods, &namespace).await?
            }
        };

        let invocation = log_invocation(&pod, &namespace, request.lines, request.follow);
        console::info(format!("Starting log tail for pod {}...", pod));

        if request.follow {
            console::info("Press Ctrl+C to stop");
            self.runner.run_streaming(&invocation).await?;
            console::info("Log tailing stopped");
        } else {
            let output = self.runner.run_json(&invocation).await?;
            let text = String::from_utf8_lossy(&output);
            let text = text.trim_end();
            if text.is_empty() {
                console::info(format!("No log output from {}", pod));
            } else {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", text)?;
            }
        }

        Ok(())
    }
}
