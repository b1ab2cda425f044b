//! Collaborators on the cluster side: credentials, pods, releases, rollouts

pub mod context;
pub mod pods;
pub mod releases;
pub mod rollout;
