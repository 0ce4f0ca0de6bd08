//! Build/version metadata for the `tagver` binary.
//!
//! The build script runs the resolver over the checkout being compiled, so
//! `tagver --version` reports what `tagver resolve` would print for its own
//! source tree.

/// The version name resolved at build time, e.g. `1.5.0-beta`.
pub const RESOLVED_VERSION: &str = env!("TAGVER_RESOLVED_VERSION");

/// The build number resolved at build time.
pub const BUILD_NUMBER: &str = env!("TAGVER_BUILD_NUMBER");

/// The git SHA emitted by the build script.
///
/// This is expected to be a 7-character hex string when available; otherwise it
/// is set to `"unknown"`.
pub const GIT_SHA_SHORT: &str = env!("TAGVER_GIT_SHA");

/// True if the git SHA looks like a short hex hash.
pub const HAS_GIT_SHA: bool = is_short_hex(GIT_SHA_SHORT);

const LONG_VERSION_WITH_SHA: &str = concat!(
    env!("TAGVER_RESOLVED_VERSION"),
    " (build ",
    env!("TAGVER_BUILD_NUMBER"),
    ", ",
    env!("TAGVER_GIT_SHA"),
    ")"
);

const LONG_VERSION_WITHOUT_SHA: &str = concat!(
    env!("TAGVER_RESOLVED_VERSION"),
    " (build ",
    env!("TAGVER_BUILD_NUMBER"),
    ")"
);

/// The version string used by CLI `--version` output.
///
/// Examples:
/// - `1.5.0-beta (build 42, a1b2c3d)`
/// - `1.5.0 (build 1)` (when git data is unavailable)
pub const LONG_VERSION: &str = if HAS_GIT_SHA {
    LONG_VERSION_WITH_SHA
} else {
    LONG_VERSION_WITHOUT_SHA
};

const fn is_short_hex(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 7 {
        return false;
    }

    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_hexdigit() {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_short_hex() {
        assert!(is_short_hex("a1b2c3d"));
        assert!(!is_short_hex("unknown"));
        assert!(!is_short_hex("a1b2c3"));
        assert!(!is_short_hex("a1b2c3d4"));
    }

    #[test]
    fn test_resolved_version_is_a_version_name() {
        let triple = RESOLVED_VERSION.split('-').next().unwrap();
        assert_eq!(triple.split('.').count(), 3);
        assert!(triple.split('.').all(|part| part.parse::<u32>().is_ok()));
        assert!(BUILD_NUMBER.parse::<u32>().unwrap() > 0);
    }

    #[test]
    fn test_long_version_starts_with_resolved_version() {
        assert!(LONG_VERSION.starts_with(RESOLVED_VERSION));
        assert!(LONG_VERSION.contains(&format!("(build {BUILD_NUMBER}")));
        assert_eq!(HAS_GIT_SHA, LONG_VERSION.contains(GIT_SHA_SHORT));
    }
}
