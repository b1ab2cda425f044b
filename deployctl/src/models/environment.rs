//! Deployment environments

use std::fmt;

use clap::ValueEnum;

/// Target environment of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Environment {
    Dev,
    Stage,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Stage => "stage",
            Environment::Prod => "prod",
        }
    }

    /// Cluster name for this environment, `<prefix>-<env>`
    pub fn cluster_name(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.as_str())
    }

    /// Namespace to operate in; the environment name unless overridden
    pub fn namespace(&self, explicit: Option<&str>) -> String {
        match explicit {
            Some(ns) if !ns.is_empty() => ns.to_string(),
            _ => self.as_str().to_string(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
