//! Workload log retrieval

pub mod streamer;
