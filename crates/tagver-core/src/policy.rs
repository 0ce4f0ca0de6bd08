//! Resolution policy.
//!
//! Every choice the resolver makes that is not forced by its inputs lives
//! here: fallback numbers, how prerelease status is detected, how release
//! tags are named, and which variables and keys are consulted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::version::VersionTriple;

/// Errors from parsing policy options given as text (CLI flags).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Unknown prerelease detection mode.
    #[error("Unknown prerelease mode '{0}' (expected 'flag-absence' or 'explicit-boolean')")]
    UnknownPrereleaseMode(String),

    /// Unknown override prerelease behaviour.
    #[error("Unknown override prerelease behaviour '{0}' (expected 'unless-release-marked' or 'independent')")]
    UnknownOverridePrerelease(String),
}

/// How the resolver decides whether a build is a prerelease.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrereleaseMode {
    /// Prerelease unless a release marker is present.
    #[default]
    FlagAbsence,
    /// Prerelease when the `IS_BETA` field says so.
    ExplicitBoolean,
}

impl FromStr for PrereleaseMode {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flag-absence" | "flag_absence" => Ok(Self::FlagAbsence),
            "explicit-boolean" | "explicit_boolean" => Ok(Self::ExplicitBoolean),
            _ => Err(PolicyError::UnknownPrereleaseMode(s.to_string())),
        }
    }
}

impl fmt::Display for PrereleaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlagAbsence => write!(f, "flag-absence"),
            Self::ExplicitBoolean => write!(f, "explicit-boolean"),
        }
    }
}

/// What happens to prerelease status when the override variable supplies the
/// version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverridePrerelease {
    /// An overridden version is a prerelease unless the release marker is
    /// present, whatever [`PrereleaseMode`] says.
    #[default]
    UnlessReleaseMarked,
    /// The override only supplies numbers; [`PrereleaseMode`] decides.
    Independent,
}

impl FromStr for OverridePrerelease {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unless-release-marked" | "unless_release_marked" => Ok(Self::UnlessReleaseMarked),
            "independent" => Ok(Self::Independent),
            _ => Err(PolicyError::UnknownOverridePrerelease(s.to_string())),
        }
    }
}

impl fmt::Display for OverridePrerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnlessReleaseMarked => write!(f, "unless-release-marked"),
            Self::Independent => write!(f, "independent"),
        }
    }
}

/// Names of the environment variables and property keys the resolver reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceNames {
    /// Env var holding a `major.minor.patch` override.
    pub override_env: String,
    /// Env var holding the CI build number.
    pub build_number_env: String,
    /// Env var holding the build timestamp token.
    pub timestamp_env: String,
    /// Env var acting as the release marker.
    pub release_env: String,
    /// Build property key acting as the release marker (presence-based).
    pub release_property: String,
    /// Property key for the build number, in build properties and the version file.
    pub build_number_key: String,
    pub major_key: String,
    pub minor_key: String,
    pub patch_key: String,
    /// Boolean prerelease field used by [`PrereleaseMode::ExplicitBoolean`].
    pub prerelease_key: String,
    /// Version-file key holding the build timestamp.
    pub timestamp_key: String,
}

impl Default for SourceNames {
    fn default() -> Self {
        Self {
            override_env: "BETA_VERSION".to_string(),
            build_number_env: "VERSION_CODE".to_string(),
            timestamp_env: "BUILD_TIMESTAMP".to_string(),
            release_env: "RELEASE".to_string(),
            release_property: "release".to_string(),
            build_number_key: "VERSION_CODE".to_string(),
            major_key: "VERSION_MAJOR".to_string(),
            minor_key: "VERSION_MINOR".to_string(),
            patch_key: "VERSION_PATCH".to_string(),
            prerelease_key: "IS_BETA".to_string(),
            timestamp_key: "TIMESTAMP".to_string(),
        }
    }
}

/// Configuration for one resolver run.
///
/// Deserialises from a partial document; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionPolicy {
    /// Fallback major for the version file and the final default.
    pub default_major: u32,
    pub default_minor: u32,
    pub default_patch: u32,
    pub prerelease_mode: PrereleaseMode,
    pub override_prerelease: OverridePrerelease,
    /// Prerelease status when [`PrereleaseMode::ExplicitBoolean`] finds no
    /// usable field.
    pub prerelease_when_unknown: bool,
    /// Classifier appended to prerelease versions.
    pub prerelease_label: String,
    /// Glob handed to git when listing release tags.
    pub release_tag_glob: String,
    /// Prefix stripped from tag names before parsing.
    pub tag_prefix: String,
    /// Tags containing this marker are never picked as the latest release.
    pub prerelease_tag_marker: String,
    pub names: SourceNames,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            default_major: 0,
            default_minor: 0,
            default_patch: 0,
            prerelease_mode: PrereleaseMode::default(),
            override_prerelease: OverridePrerelease::default(),
            prerelease_when_unknown: true,
            prerelease_label: "beta".to_string(),
            release_tag_glob: "v*".to_string(),
            tag_prefix: "v".to_string(),
            prerelease_tag_marker: "beta".to_string(),
            names: SourceNames::default(),
        }
    }
}

impl ResolutionPolicy {
    /// The version used when no source supplies one.
    #[must_use]
    pub const fn default_triple(&self) -> VersionTriple {
        VersionTriple::new(self.default_major, self.default_minor, self.default_patch)
    }

    /// Policy for projects that treat an unversioned build as `1.0.0`.
    #[must_use]
    pub fn post_first_release() -> Self {
        Self {
            default_major: 1,
            ..Self::default()
        }
    }

    /// Policy driven by the `IS_BETA` field of the version file.
    #[must_use]
    pub fn version_file_driven() -> Self {
        Self {
            prerelease_mode: PrereleaseMode::ExplicitBoolean,
            override_prerelease: OverridePrerelease::Independent,
            ..Self::default()
        }
    }
}
