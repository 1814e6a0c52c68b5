//! Configuration model for rollout.
//!
//! This module defines the Config struct that represents `rollout.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::Config;
pub use operations::locate_config;
pub use types::CommitAuthor;
