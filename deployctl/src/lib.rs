//! deployctl library
//!
//! Log retrieval and Helm release rollback for a containerized workload
//! running on per-environment EKS clusters.

pub mod app;
pub mod cluster;
pub mod console;
pub mod errors;
pub mod exec;
pub mod filesys;
pub mod logs;
pub mod logstream;
pub mod models;
pub mod prompt;
pub mod rollback;
pub mod storage;
pub mod utils;
