//! WorkflowMax timesheet CLI library.
//!
//! This crate provides the interactive interface: configuration, prompts,
//! and the linear job/task/duration flow that ends in a submission.

mod cli;
mod config;
pub mod flow;
pub mod prompt;
pub mod theme;

pub use cli::Cli;
pub use config::{CONFIG_FILE_NAME, Config, ConfigError, TUTORIAL};
