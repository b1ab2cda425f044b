//! Release rollback

pub mod fsm;
pub mod orchestrator;
pub mod report;
pub mod resolver;
