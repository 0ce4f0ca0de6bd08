//! Command-line adapter for tagver.
//!
//! `main.rs` parses arguments and hands them to [`bootstrap`], which snapshots
//! the environment, loads properties files and wires the git adapter into a
//! [`CliContext`]. Handlers only format what the context resolves.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; tempfile is used by tests/
#[cfg(test)]
use tempfile as _;

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::{Cli, PolicyArgs, SourceArgs};
