//! CLI tool for consistent hash rings.
//!
//! Provides commands for:
//! - Running the add/resolve/remove demonstration
//! - Resolving keys against a configured ring
//! - Inspecting virtual node placement and ownership

pub mod commands;
pub mod config;

pub use commands::{Assignment, Command, CommandResult};
pub use config::{CliConfig, OutputFormat};
