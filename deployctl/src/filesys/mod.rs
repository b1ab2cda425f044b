//! Filesystem helpers

pub mod file;
