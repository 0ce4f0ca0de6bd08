//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options. Every
//! global option may appear before or after the subcommand.

use std::path::PathBuf;

use clap::{Args, Parser};
use tagver_core::{OverridePrerelease, PrereleaseMode};

use crate::commands::Commands;

/// Command-line interface definition for the version resolver.
#[derive(Parser, Debug)]
#[command(name = "tagver")]
#[command(about = "Resolve build versions from git tags, environment variables and properties files")]
#[command(version = tagver_build_info::LONG_VERSION)]
pub struct Cli {
    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Enable verbose/debug output on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the resolver's inputs come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Repository (or any directory inside it) to query for tags
    #[arg(long, global = true, env = "TAGVER_REPO", default_value = ".")]
    pub repo: PathBuf,

    /// Do not query git at all
    #[arg(long, global = true)]
    pub no_git: bool,

    /// Version-tracking properties file [default: <repo>/version.properties]
    #[arg(long, global = true, env = "TAGVER_VERSION_FILE")]
    pub version_file: Option<PathBuf>,

    /// Directory holding <build-type>.properties files [default: <repo>/config]
    #[arg(long, global = true, env = "TAGVER_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Build property as KEY or KEY=VALUE (repeatable)
    #[arg(short = 'P', long = "property", global = true, value_name = "KEY[=VALUE]")]
    pub properties: Vec<String>,

    /// Mark this as a release build (same as -P release)
    #[arg(long, global = true)]
    pub release: bool,
}

/// Overrides applied on top of the resolution policy.
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// JSON file with resolution policy settings
    #[arg(long = "policy", global = true, env = "TAGVER_POLICY")]
    pub policy_file: Option<PathBuf>,

    /// Major version used when no source supplies one
    #[arg(long, global = true)]
    pub default_major: Option<u32>,

    /// Minor version used when no source supplies one
    #[arg(long, global = true)]
    pub default_minor: Option<u32>,

    /// Patch version used when no source supplies one
    #[arg(long, global = true)]
    pub default_patch: Option<u32>,

    /// How prerelease status is decided: flag-absence or explicit-boolean
    #[arg(long, global = true)]
    pub prerelease_mode: Option<PrereleaseMode>,

    /// Prerelease handling for overridden versions: unless-release-marked or independent
    #[arg(long, global = true)]
    pub override_prerelease: Option<OverridePrerelease>,

    /// Classifier appended to prerelease versions
    #[arg(long, global = true)]
    pub prerelease_label: Option<String>,

    /// Glob selecting release tags
    #[arg(long, global = true)]
    pub tag_glob: Option<String>,

    /// Prefix stripped from tag names
    #[arg(long, global = true)]
    pub tag_prefix: Option<String>,
}
