//! Version domain types.
//!
//! A resolution run produces one [`VersionSpec`]: the numeric triple plus the
//! prerelease classifier and the store build number.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Build number used when no source supplies a positive value.
pub const DEFAULT_BUILD_NUMBER: u32 = 1;

/// The `major.minor.patch` part of a version.
///
/// Ordering is numeric, field by field, so it can be used to rank release tags.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VersionTriple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTriple {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a dotted version leniently.
    ///
    /// Only the first three segments are read. A segment that is missing, not
    /// a number, or out of range for `u32` becomes `0`; extra segments are
    /// ignored. This never fails.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let mut segments = raw.trim().split('.').map(parse_segment);
        Self {
            major: segments.next().flatten().unwrap_or(0),
            minor: segments.next().flatten().unwrap_or(0),
            patch: segments.next().flatten().unwrap_or(0),
        }
    }

    /// Parse a tag name such as `v1.4.2` after stripping `prefix`.
    ///
    /// A tag that does not carry the prefix is parsed as-is.
    #[must_use]
    pub fn from_tag(tag: &str, prefix: &str) -> Self {
        let tag = tag.trim();
        Self::parse_lenient(tag.strip_prefix(prefix).unwrap_or(tag))
    }
}

fn parse_segment(segment: &str) -> Option<u32> {
    segment.trim().parse::<u32>().ok()
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The fully resolved version of one build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionSpec {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Store build number (Android `versionCode`), always positive.
    pub build_number: u32,
    pub is_prerelease: bool,
    /// Classifier label such as `beta`. `Some` only when `is_prerelease`.
    pub prerelease_label: Option<String>,
    /// Opaque build timestamp token. Only rendered for prereleases.
    pub build_timestamp: Option<String>,
}

impl VersionSpec {
    /// A release version with the given triple and the default build number.
    #[must_use]
    pub const fn release(triple: VersionTriple) -> Self {
        Self {
            major: triple.major,
            minor: triple.minor,
            patch: triple.patch,
            build_number: DEFAULT_BUILD_NUMBER,
            is_prerelease: false,
            prerelease_label: None,
            build_timestamp: None,
        }
    }

    /// Mark this version as a prerelease carrying `label`.
    #[must_use]
    pub fn with_prerelease(mut self, label: impl Into<String>) -> Self {
        self.is_prerelease = true;
        self.prerelease_label = Some(label.into());
        self
    }

    /// Attach a build timestamp token. Blank tokens are dropped.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        let timestamp = timestamp.into();
        self.build_timestamp = if timestamp.trim().is_empty() {
            None
        } else {
            Some(timestamp.trim().to_string())
        };
        self
    }

    /// Set the build number. Zero is not a valid build number and is ignored.
    #[must_use]
    pub const fn with_build_number(mut self, build_number: u32) -> Self {
        if build_number > 0 {
            self.build_number = build_number;
        }
        self
    }

    #[must_use]
    pub const fn triple(&self) -> VersionTriple {
        VersionTriple::new(self.major, self.minor, self.patch)
    }

    /// The rendered version name, e.g. `1.2.3-beta.20240115`.
    #[must_use]
    pub fn version_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.triple())?;
        if !self.is_prerelease {
            return Ok(());
        }
        if let Some(label) = &self.prerelease_label {
            write!(f, "-{label}")?;
            if let Some(timestamp) = &self.build_timestamp {
                write!(f, ".{timestamp}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_full_triple() {
        assert_eq!(
            VersionTriple::parse_lenient("2.3.1"),
            VersionTriple::new(2, 3, 1)
        );
    }

    #[test]
    fn test_parse_lenient_defaults_missing_and_bad_segments() {
        assert_eq!(VersionTriple::parse_lenient("4"), VersionTriple::new(4, 0, 0));
        assert_eq!(
            VersionTriple::parse_lenient("1.x.7"),
            VersionTriple::new(1, 0, 7)
        );
        assert_eq!(
            VersionTriple::parse_lenient("1.2.99999999999"),
            VersionTriple::new(1, 2, 0)
        );
        assert_eq!(VersionTriple::parse_lenient(""), VersionTriple::default());
    }

    #[test]
    fn test_parse_lenient_ignores_extra_segments() {
        assert_eq!(
            VersionTriple::parse_lenient("1.2.3.4.5"),
            VersionTriple::new(1, 2, 3)
        );
    }

    #[test]
    fn test_from_tag_strips_prefix() {
        assert_eq!(
            VersionTriple::from_tag("v9.0.0\n", "v"),
            VersionTriple::new(9, 0, 0)
        );
        assert_eq!(
            VersionTriple::from_tag("3.1.4", "v"),
            VersionTriple::new(3, 1, 4)
        );
    }

    #[test]
    fn test_triple_ordering_is_numeric() {
        assert!(VersionTriple::new(1, 10, 0) > VersionTriple::new(1, 9, 9));
        assert!(VersionTriple::new(2, 0, 0) > VersionTriple::new(1, 99, 99));
    }

    #[test]
    fn test_display_release() {
        let spec = VersionSpec::release(VersionTriple::new(1, 2, 3)).with_timestamp("20240115");
        assert_eq!(spec.to_string(), "1.2.3");
    }

    #[test]
    fn test_display_prerelease_with_timestamp() {
        let spec = VersionSpec::release(VersionTriple::new(1, 2, 3))
            .with_prerelease("beta")
            .with_timestamp("20240115");
        assert_eq!(spec.version_name(), "1.2.3-beta.20240115");
    }

    #[test]
    fn test_display_prerelease_without_timestamp() {
        let spec = VersionSpec::release(VersionTriple::new(0, 0, 0))
            .with_prerelease("beta")
            .with_timestamp("   ");
        assert_eq!(spec.to_string(), "0.0.0-beta");
        assert!(spec.build_timestamp.is_none());
    }

    #[test]
    fn test_zero_build_number_is_ignored() {
        let spec = VersionSpec::release(VersionTriple::default()).with_build_number(0);
        assert_eq!(spec.build_number, DEFAULT_BUILD_NUMBER);
    }
}
