//! External command execution

pub mod runner;
