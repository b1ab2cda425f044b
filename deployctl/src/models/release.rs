//! Helm releases and their revision history

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// A release as listed by the release manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub name: String,

    /// Current (deployed) revision
    #[serde(rename = "revision", deserialize_with = "revision_from_any")]
    pub current_revision: u32,
}

/// One entry of a release's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    #[serde(deserialize_with = "revision_from_any")]
    pub revision: u32,

    #[serde(default)]
    pub description: String,

    /// Update time exactly as the release manager printed it
    #[serde(default)]
    pub updated: String,
}

impl RevisionRecord {
    /// Update time, when it is RFC 3339
    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.updated).ok()
    }
}

/// `helm list` prints revisions as strings, `helm history` as numbers
fn revision_from_any<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    let revision = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom)?,
    };
    if revision == 0 {
        return Err(serde::de::Error::custom("revision must be at least 1"));
    }
    Ok(revision)
}
