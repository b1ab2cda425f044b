//! Settings file management

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::OpsError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Workload name: release name, deployment name and pod label value
    #[serde(default = "default_workload")]
    pub workload: String,

    /// Clusters are named `<cluster_prefix>-<environment>`
    #[serde(default = "default_cluster_prefix")]
    pub cluster_prefix: String,

    /// Cloud region of every cluster
    #[serde(default = "default_region")]
    pub region: String,

    /// Upper bound handed to the rollout status wait
    #[serde(default = "default_rollout_timeout")]
    pub rollout_timeout_secs: u64,

    /// Tail length when `--lines` is not given
    #[serde(default = "default_log_lines")]
    pub default_log_lines: u32,

    /// Diagnostic log level
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    /// Emit diagnostic logs as JSON
    #[serde(default)]
    pub log_json: bool,
}

fn default_workload() -> String {
    "sample-app".to_string()
}

fn default_cluster_prefix() -> String {
    "demo-eks".to_string()
}

fn default_region() -> String {
    "us-west-2".to_string()
}

fn default_rollout_timeout() -> u64 {
    300
}

fn default_log_lines() -> u32 {
    100
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workload: default_workload(),
            cluster_prefix: default_cluster_prefix(),
            region: default_region(),
            rollout_timeout_secs: default_rollout_timeout(),
            default_log_lines: default_log_lines(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn rollout_timeout(&self) -> Duration {
        Duration::from_secs(self.rollout_timeout_secs)
    }

    /// `$HOME/.config/deployctl/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(|home| {
                PathBuf::from(home)
                    .join(".config")
                    .join("deployctl")
                    .join("settings.json")
            })
    }

    /// Load settings.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present, otherwise built-in defaults.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, OpsError> {
        Self::load_with_fallback(explicit, Self::default_path()).await
    }

    async fn load_with_fallback(
        explicit: Option<&Path>,
        fallback: Option<PathBuf>,
    ) -> Result<Self, OpsError> {
        let file = match explicit {
            Some(path) => {
                let file = File::new(path);
                if !file.exists().await {
                    return Err(OpsError::ConfigError(format!(
                        "Settings file not found: {}",
                        path.display()
                    )));
                }
                file
            }
            None => {
                let file = match fallback {
                    Some(path) => File::new(path),
                    None => return Ok(Self::default()),
                };
                if !file.exists().await {
                    debug!("No settings file, using defaults");
                    return Ok(Self::default());
                }
                file
            }
        };

        let settings: Settings = file.read_json().await.map_err(|e| {
            OpsError::ConfigError(format!("Unable to read {}: {}", file.path().display(), e))
        })?;
        settings.validate()?;
        debug!("Loaded settings from {}", file.path().display());
        Ok(settings)
    }

    fn validate(&self) -> Result<(), OpsError> {
        if self.workload.trim().is_empty() {
            return Err(OpsError::ConfigError("workload must not be empty".to_string()));
        }
        if self.cluster_prefix.trim().is_empty() {
            return Err(OpsError::ConfigError("cluster_prefix must not be empty".to_string()));
        }
        if self.rollout_timeout_secs == 0 {
            return Err(OpsError::ConfigError(
                "rollout_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.default_log_lines == 0 {
            return Err(OpsError::ConfigError(
                "default_log_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
