//! The recoverable failure condition of version resolution.
//!
//! Resolution itself has no fatal path. Each variant describes why one input
//! source could not be used; the resolver records it and moves on to the next
//! source.

use thiserror::Error;

use crate::ports::GitError;

/// Why an input source was skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceUnavailable {
    /// An environment variable is not set.
    #[error("environment variable {0} is not set")]
    EnvMissing(String),

    /// An environment variable is set to an empty or whitespace value.
    #[error("environment variable {0} is blank")]
    EnvBlank(String),

    /// No git capability was provided for this run.
    #[error("git is not available")]
    GitUnavailable,

    /// A git query failed.
    #[error("{0}")]
    GitFailed(#[from] GitError),

    /// HEAD carries no tag.
    #[error("HEAD has no exact tag")]
    NoExactTag,

    /// No tag matching the glob qualifies as a release.
    #[error("no release tag matches '{0}'")]
    NoReleaseTag(String),

    /// No version properties file was provided.
    #[error("no version properties file")]
    NoVersionFile,

    /// The version properties file has none of the version fields.
    #[error("version properties file has no version fields")]
    NoVersionFields,

    /// A property is not set.
    #[error("property {0} is not set")]
    PropertyMissing(String),

    /// A property holds a value that does not parse.
    #[error("property {key} has malformed value '{value}'")]
    MalformedValue { key: String, value: String },

    /// A build number is not a positive integer.
    #[error("{key} is not a positive build number: '{value}'")]
    InvalidBuildNumber { key: String, value: String },
}
