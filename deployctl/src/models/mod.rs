//! Data models for the workload's runtime state

pub mod environment;
pub mod pod;
pub mod release;
