//! Workload pods as reported by the cluster

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pod lifecycle phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PodPhase::Pending => "Pending",
            PodPhase::Running => "Running",
            PodPhase::Succeeded => "Succeeded",
            PodPhase::Failed => "Failed",
            PodPhase::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Snapshot of a single pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    pub phase: PodPhase,
}

/// `kubectl get pods -o json` body; only the fields we read
#[derive(Debug, Deserialize)]
pub struct PodList {
    #[serde(default)]
    pub items: Vec<PodItem>,
}

#[derive(Debug, Deserialize)]
pub struct PodItem {
    pub metadata: PodMetadata,
    #[serde(default)]
    pub status: Option<PodStatus>,
}

#[derive(Debug, Deserialize)]
pub struct PodMetadata {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PodStatus {
    #[serde(default)]
    pub phase: PodPhase,
}

impl From<PodItem> for Pod {
    fn from(item: PodItem) -> Self {
        Self {
            name: item.metadata.name,
            phase: item.status.map(|s| s.phase).unwrap_or_default(),
        }
    }
}
