//! Label assignment and propagation engine.

pub mod config;
pub mod engine;

pub use config::AssignConfig;
pub use engine::{AssignmentSummary, LabelEngine};
