//! CLI-specific error types and exit code mapping.
//!
//! Resolution itself never fails; these cover what the user asked for
//! explicitly and got wrong.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error on a file the user named explicitly.
    #[error("IO error on {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// Policy file or policy option error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h:
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 74: IO error
    /// - 78: Configuration error
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io { .. } => 74,   // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}
