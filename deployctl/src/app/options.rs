//! Application configuration options

use std::time::Duration;

use crate::storage::settings::Settings;

/// Options every command runs with
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Workload (release, deployment and pod label) name
    pub workload: String,

    /// Cluster name prefix
    pub cluster_prefix: String,

    /// Cloud region
    pub region: String,

    /// Bound on the rollout status wait
    pub rollout_timeout: Duration,

    /// Tail length when none is requested
    pub default_log_lines: u32,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for AppOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            workload: settings.workload.clone(),
            cluster_prefix: settings.cluster_prefix.clone(),
            region: settings.region.clone(),
            rollout_timeout: settings.rollout_timeout(),
            default_log_lines: settings.default_log_lines,
        }
    }
}
