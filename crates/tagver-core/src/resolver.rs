//! Version resolution.
//!
//! Resolution order for the numeric triple (first usable source wins):
//! 1. Override environment variable (`BETA_VERSION`)
//! 2. Exact git tag on HEAD
//! 3. Newest release tag matching the release glob, prerelease tags excluded
//! 4. `VERSION_MAJOR` / `VERSION_MINOR` / `VERSION_PATCH` in the version file
//! 5. The policy's default triple
//!
//! Prerelease status, the build timestamp and the build number are resolved
//! independently afterwards. Nothing here fails: every unusable source is
//! recorded as a [`SourceUnavailable`] and skipped.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::SourceUnavailable;
use crate::policy::{OverridePrerelease, PrereleaseMode, ResolutionPolicy};
use crate::ports::GitQuery;
use crate::properties::{Properties, parse_flag};
use crate::version::{DEFAULT_BUILD_NUMBER, VersionSpec, VersionTriple};

/// Snapshot of environment variables handed to the resolver.
pub type Environment = BTreeMap<String, String>;

/// Where the numeric triple came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// The override environment variable.
    Override,
    /// A tag naming HEAD exactly.
    ExactTag(String),
    /// The newest release tag in the repository.
    LatestReleaseTag(String),
    /// The version properties file.
    VersionFile,
    /// The policy default.
    Default,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::ExactTag(tag) => write!(f, "exact-tag ({tag})"),
            Self::LatestReleaseTag(tag) => write!(f, "latest-release-tag ({tag})"),
            Self::VersionFile => write!(f, "version-file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Where the build number came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildNumberSource {
    Env,
    BuildProperty,
    VersionFile,
    Default,
}

impl fmt::Display for BuildNumberSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => write!(f, "env"),
            Self::BuildProperty => write!(f, "build-property"),
            Self::VersionFile => write!(f, "version-file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Everything the resolver may consult, injected explicitly.
#[derive(Clone, Copy)]
pub struct ResolutionInputs<'a> {
    /// Environment variables of the build invocation.
    pub env: &'a Environment,
    /// Project properties passed to the build (`-P key=value`).
    pub build_properties: &'a Properties,
    /// The version-tracking properties file, if one exists.
    pub version_file: Option<&'a Properties>,
    /// Git capability; `None` when no repository is available.
    pub git: Option<&'a dyn GitQuery>,
}

impl<'a> ResolutionInputs<'a> {
    /// Inputs with only an environment and build properties.
    #[must_use]
    pub const fn new(env: &'a Environment, build_properties: &'a Properties) -> Self {
        Self {
            env,
            build_properties,
            version_file: None,
            git: None,
        }
    }

    /// Attach a git capability.
    #[must_use]
    pub const fn with_git(mut self, git: &'a dyn GitQuery) -> Self {
        self.git = Some(git);
        self
    }

    /// Attach a version properties file.
    #[must_use]
    pub const fn with_version_file(mut self, version_file: &'a Properties) -> Self {
        self.version_file = Some(version_file);
        self
    }
}

/// Outcome of one resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved version.
    pub spec: VersionSpec,
    /// How the numeric triple was determined.
    pub source: VersionSource,
    /// How the build number was determined.
    pub build_number_source: BuildNumberSource,
    /// Whether a release marker was present.
    pub release_marked: bool,
    /// Sources that were skipped, in the order they were tried.
    pub fallbacks: Vec<SourceUnavailable>,
}

/// Resolve the effective version for one build invocation.
///
/// Pure apart from calls through `inputs.git`: identical inputs always yield
/// the same [`Resolution`].
pub fn resolve_version(policy: &ResolutionPolicy, inputs: &ResolutionInputs<'_>) -> Resolution {
    let mut run = Run {
        policy,
        inputs,
        fallbacks: Vec::new(),
    };

    let (triple, source) = run.resolve_triple();
    let release_marked = run.release_marked();
    let is_prerelease = run.is_prerelease(&source, release_marked);
    let (build_number, build_number_source) = run.resolve_build_number();

    let mut spec = VersionSpec::release(triple).with_build_number(build_number);
    if is_prerelease {
        spec = spec.with_prerelease(policy.prerelease_label.clone());
        if let Some(timestamp) = run.resolve_timestamp() {
            spec = spec.with_timestamp(timestamp);
        }
    }

    tracing::debug!(
        version = %spec,
        build_number = spec.build_number,
        source = %source,
        "Resolved version"
    );

    Resolution {
        spec,
        source,
        build_number_source,
        release_marked,
        fallbacks: run.fallbacks,
    }
}

/// State of a single run: the inputs plus the skipped sources so far.
struct Run<'p, 'i, 'a> {
    policy: &'p ResolutionPolicy,
    inputs: &'i ResolutionInputs<'a>,
    fallbacks: Vec<SourceUnavailable>,
}

impl Run<'_, '_, '_> {
    fn skip(&mut self, reason: SourceUnavailable) {
        tracing::debug!(%reason, "Version source unavailable");
        self.fallbacks.push(reason);
    }

    /// Non-blank value of an environment variable.
    fn env_value(&mut self, name: &str) -> Option<String> {
        match self.inputs.env.get(name) {
            None => {
                self.skip(SourceUnavailable::EnvMissing(name.to_string()));
                None
            }
            Some(value) if value.trim().is_empty() => {
                self.skip(SourceUnavailable::EnvBlank(name.to_string()));
                None
            }
            Some(value) => Some(value.trim().to_string()),
        }
    }

    fn resolve_triple(&mut self) -> (VersionTriple, VersionSource) {
        if let Some(triple) = self.from_override() {
            return (triple, VersionSource::Override);
        }

        let git = self.inputs.git;
        match git {
            Some(git) => {
                if let Some(tag) = self.exact_tag(git) {
                    let triple = VersionTriple::from_tag(&tag, &self.policy.tag_prefix);
                    return (triple, VersionSource::ExactTag(tag));
                }
                if let Some(tag) = self.latest_release_tag(git) {
                    let triple = VersionTriple::from_tag(&tag, &self.policy.tag_prefix);
                    return (triple, VersionSource::LatestReleaseTag(tag));
                }
            }
            None => self.skip(SourceUnavailable::GitUnavailable),
        }

        if let Some(triple) = self.from_version_file() {
            return (triple, VersionSource::VersionFile);
        }

        (self.policy.default_triple(), VersionSource::Default)
    }

    fn from_override(&mut self) -> Option<VersionTriple> {
        let name = self.policy.names.override_env.clone();
        self.env_value(&name)
            .map(|raw| VersionTriple::parse_lenient(&raw))
    }

    fn exact_tag(&mut self, git: &dyn GitQuery) -> Option<String> {
        match git.exact_tag_at_head() {
            Ok(Some(tag)) if !tag.trim().is_empty() => Some(tag.trim().to_string()),
            Ok(_) => {
                self.skip(SourceUnavailable::NoExactTag);
                None
            }
            Err(e) => {
                self.skip(e.into());
                None
            }
        }
    }

    fn latest_release_tag(&mut self, git: &dyn GitQuery) -> Option<String> {
        let policy = self.policy;
        let glob = &policy.release_tag_glob;
        let tags = match git.tags_matching(glob) {
            Ok(tags) => tags,
            Err(e) => {
                self.skip(e.into());
                return None;
            }
        };

        let prefix = &policy.tag_prefix;
        let marker = &policy.prerelease_tag_marker;
        let mut candidates: Vec<(VersionTriple, &str)> = tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty() && tag.starts_with(prefix.as_str()))
            .filter(|tag| marker.is_empty() || !tag.contains(marker.as_str()))
            .map(|tag| (VersionTriple::from_tag(tag, prefix), tag))
            .collect();

        // Stable, so git's own ordering decides between equal triples.
        candidates.sort_by(|a, b| b.0.cmp(&a.0));

        if let Some((_, tag)) = candidates.first() {
            return Some((*tag).to_string());
        }
        self.skip(SourceUnavailable::NoReleaseTag(glob.clone()));
        None
    }

    fn from_version_file(&mut self) -> Option<VersionTriple> {
        let Some(file) = self.inputs.version_file else {
            self.skip(SourceUnavailable::NoVersionFile);
            return None;
        };

        let names = &self.policy.names;
        let keys = [
            names.major_key.clone(),
            names.minor_key.clone(),
            names.patch_key.clone(),
        ];
        if !keys.iter().any(|key| file.contains_key(key)) {
            self.skip(SourceUnavailable::NoVersionFields);
            return None;
        }

        let [major_key, minor_key, patch_key] = keys;
        Some(VersionTriple::new(
            self.version_field(file, &major_key, self.policy.default_major),
            self.version_field(file, &minor_key, self.policy.default_minor),
            self.version_field(file, &patch_key, self.policy.default_patch),
        ))
    }

    fn version_field(&mut self, file: &Properties, key: &str, default: u32) -> u32 {
        let Some(raw) = file.get(key) else {
            self.skip(SourceUnavailable::PropertyMissing(key.to_string()));
            return default;
        };
        if let Ok(value) = raw.trim().parse::<u32>() {
            value
        } else {
            self.skip(SourceUnavailable::MalformedValue {
                key: key.to_string(),
                value: raw.to_string(),
            });
            default
        }
    }

    /// A release property is presence-based; the release env var counts
    /// unless it is blank or spells out a false value.
    fn release_marked(&self) -> bool {
        let names = &self.policy.names;
        if self.inputs.build_properties.contains_key(&names.release_property) {
            return true;
        }
        self.inputs
            .env
            .get(&names.release_env)
            .is_some_and(|value| !value.trim().is_empty() && parse_flag(value) != Some(false))
    }

    fn is_prerelease(&mut self, source: &VersionSource, release_marked: bool) -> bool {
        if *source == VersionSource::Override
            && self.policy.override_prerelease == OverridePrerelease::UnlessReleaseMarked
        {
            return !release_marked;
        }

        match self.policy.prerelease_mode {
            PrereleaseMode::FlagAbsence => !release_marked,
            PrereleaseMode::ExplicitBoolean => self.explicit_prerelease_flag(),
        }
    }

    fn explicit_prerelease_flag(&mut self) -> bool {
        let key = self.policy.names.prerelease_key.clone();
        let sources = [Some(self.inputs.build_properties), self.inputs.version_file];
        let mut seen = false;
        for props in sources.into_iter().flatten() {
            let Some(raw) = props.get(&key) else {
                continue;
            };
            if let Some(flag) = parse_flag(raw) {
                return flag;
            }
            seen = true;
            self.skip(SourceUnavailable::MalformedValue {
                key: key.clone(),
                value: raw.to_string(),
            });
        }
        if !seen {
            self.skip(SourceUnavailable::PropertyMissing(key));
        }
        self.policy.prerelease_when_unknown
    }

    fn resolve_timestamp(&mut self) -> Option<String> {
        let env_name = self.policy.names.timestamp_env.clone();
        if let Some(timestamp) = self.env_value(&env_name) {
            return Some(timestamp);
        }

        let policy = self.policy;
        let key = &policy.names.timestamp_key;
        let version_file = self.inputs.version_file;
        let value = version_file
            .and_then(|file| file.get(key))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        if value.is_none() {
            self.skip(SourceUnavailable::PropertyMissing(key.clone()));
        }
        value
    }

    fn resolve_build_number(&mut self) -> (u32, BuildNumberSource) {
        let names = &self.policy.names;
        let env_name = names.build_number_env.clone();
        let key = names.build_number_key.clone();

        if let Some(raw) = self.env_value(&env_name) {
            if let Some(number) = self.build_number(&env_name, &raw) {
                return (number, BuildNumberSource::Env);
            }
        }

        let inputs = self.inputs;
        if let Some(raw) = inputs.build_properties.get(&key) {
            if let Some(number) = self.build_number(&key, raw) {
                return (number, BuildNumberSource::BuildProperty);
            }
        }

        if let Some(raw) = inputs.version_file.and_then(|file| file.get(&key)) {
            if let Some(number) = self.build_number(&key, raw) {
                return (number, BuildNumberSource::VersionFile);
            }
        }

        (DEFAULT_BUILD_NUMBER, BuildNumberSource::Default)
    }

    fn build_number(&mut self, key: &str, raw: &str) -> Option<u32> {
        match raw.trim().parse::<u32>() {
            Ok(number) if number > 0 => Some(number),
            _ => {
                self.skip(SourceUnavailable::InvalidBuildNumber {
                    key: key.to_string(),
                    value: raw.to_string(),
                });
                None
            }
        }
    }
}
