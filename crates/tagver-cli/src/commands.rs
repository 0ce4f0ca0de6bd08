//! Subcommands of the `tagver` binary.

use clap::Subcommand;
use clap_complete::Shell;
use tagver_core::{BuildType, DEFAULT_ARTIFACT_EXTENSION};

/// Available commands.
///
/// Every command resolves from the same inputs; they differ only in what
/// they print.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved version name (e.g. 1.4.0-beta.20240115)
    Resolve {
        /// Print the full resolution as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Show every resolved field, the winning sources and skipped sources
    Explain,

    /// Print the resolved build number
    BuildNumber,

    /// Print the file name of the packaged artifact
    ArtifactName {
        /// Base application id (e.g. com.example.app)
        #[arg(long)]
        app_id: String,
        /// Build type: debug or release
        #[arg(long, default_value = "debug")]
        build_type: BuildType,
        /// File extension of the artifact
        #[arg(long, default_value = DEFAULT_ARTIFACT_EXTENSION)]
        extension: String,
    },

    /// Print the constants forwarded from <config-dir>/<build-type>.properties
    Fields {
        /// Build type: debug or release
        #[arg(long, default_value = "debug")]
        build_type: BuildType,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
