//! End-to-end behaviour of version resolution across all input sources.

use std::fs;

use tagver_core::{
    BuildNumberSource, Environment, GitError, GitQuery, Properties, ResolutionInputs,
    ResolutionPolicy, SourceUnavailable, VersionSource, VersionTriple, resolve_version,
};

/// Fake repository answering from fixed data.
struct StaticGit {
    exact: Option<&'static str>,
    tags: Vec<&'static str>,
}

impl GitQuery for StaticGit {
    fn exact_tag_at_head(&self) -> Result<Option<String>, GitError> {
        Ok(self.exact.map(str::to_string))
    }

    fn tags_matching(&self, _glob: &str) -> Result<Vec<String>, GitError> {
        Ok(self.tags.iter().map(|t| (*t).to_string()).collect())
    }
}

/// Fake repository where every git invocation fails.
struct BrokenGit;

impl GitQuery for BrokenGit {
    fn exact_tag_at_head(&self) -> Result<Option<String>, GitError> {
        Err(GitError::NotInstalled("No such file or directory".to_string()))
    }

    fn tags_matching(&self, _glob: &str) -> Result<Vec<String>, GitError> {
        Err(GitError::NotInstalled("No such file or directory".to_string()))
    }
}

fn env(pairs: &[(&str, &str)]) -> Environment {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn override_triples_are_taken_verbatim() {
    let props = Properties::new();
    let policy = ResolutionPolicy::default();

    for (raw, expected) in [
        ("2.3.1", VersionTriple::new(2, 3, 1)),
        ("10.0.42", VersionTriple::new(10, 0, 42)),
        ("7.1", VersionTriple::new(7, 1, 0)),
        ("1.2.3.4", VersionTriple::new(1, 2, 3)),
        ("1.-2.3", VersionTriple::new(1, 0, 3)),
        ("4294967296.1.1", VersionTriple::new(0, 1, 1)),
    ] {
        let env = env(&[("BETA_VERSION", raw)]);
        let inputs = ResolutionInputs::new(&env, &props);
        let resolution = resolve_version(&policy, &inputs);
        assert_eq!(resolution.source, VersionSource::Override, "{raw}");
        assert_eq!(resolution.spec.triple(), expected, "{raw}");
    }
}

#[test]
fn all_sources_absent_yields_default_triple() {
    let env = Environment::new();
    let props = Properties::new();
    let inputs = ResolutionInputs::new(&env, &props);

    let resolution = resolve_version(&ResolutionPolicy::default(), &inputs);
    assert_eq!(resolution.source, VersionSource::Default);
    assert_eq!(resolution.spec.triple(), VersionTriple::new(0, 0, 0));
    assert_eq!(resolution.spec.build_number, 1);
    assert_eq!(resolution.build_number_source, BuildNumberSource::Default);
    assert_eq!(resolution.spec.to_string(), "0.0.0-beta");

    let resolution = resolve_version(&ResolutionPolicy::post_first_release(), &inputs);
    assert_eq!(resolution.spec.to_string(), "1.0.0-beta");
}

#[test]
fn repeated_resolution_is_identical() {
    let env = env(&[("BUILD_TIMESTAMP", "20240115"), ("VERSION_CODE", "12")]);
    let props = Properties::new();
    let file = Properties::parse("VERSION_MAJOR=1\nVERSION_MINOR=4");
    let git = StaticGit {
        exact: None,
        tags: vec!["v1.3.0", "v1.2.9"],
    };
    let inputs = ResolutionInputs::new(&env, &props)
        .with_git(&git)
        .with_version_file(&file);
    let policy = ResolutionPolicy::default();

    let first = resolve_version(&policy, &inputs);
    let second = resolve_version(&policy, &inputs);
    assert_eq!(first, second);
    assert_eq!(first.spec.to_string(), second.spec.to_string());
}

#[test]
fn override_beats_exact_tag() {
    let env = env(&[("BETA_VERSION", "2.3.1")]);
    let props = Properties::new();
    let git = StaticGit {
        exact: Some("v9.0.0"),
        tags: vec!["v9.0.0"],
    };
    let inputs = ResolutionInputs::new(&env, &props).with_git(&git);

    let resolution = resolve_version(&ResolutionPolicy::default(), &inputs);
    assert!(resolution.spec.to_string().starts_with("2.3.1"));
}

#[test]
fn exact_tag_beats_latest_release_tag() {
    let env = Environment::new();
    let props = Properties::new();
    let git = StaticGit {
        exact: Some("v1.0.1"),
        tags: vec!["v2.0.0", "v1.0.1"],
    };
    let inputs = ResolutionInputs::new(&env, &props).with_git(&git);

    let resolution = resolve_version(&ResolutionPolicy::default(), &inputs);
    assert_eq!(resolution.source, VersionSource::ExactTag("v1.0.1".to_string()));
    assert_eq!(resolution.spec.triple(), VersionTriple::new(1, 0, 1));
}

#[test]
fn prerelease_suffix_carries_timestamp() {
    let env = env(&[("BETA_VERSION", "1.4.0"), ("BUILD_TIMESTAMP", "20240115")]);
    let props = Properties::new();
    let inputs = ResolutionInputs::new(&env, &props);

    let resolution = resolve_version(&ResolutionPolicy::default(), &inputs);
    assert_eq!(resolution.spec.to_string(), "1.4.0-beta.20240115");
}

#[test]
fn release_marker_removes_suffix_regardless_of_timestamp() {
    let override_env = env(&[("BETA_VERSION", "1.4.0"), ("BUILD_TIMESTAMP", "20240115")]);
    let props = Properties::parse("release=true");
    let inputs = ResolutionInputs::new(&override_env, &props);

    let resolution = resolve_version(&ResolutionPolicy::default(), &inputs);
    assert_eq!(resolution.spec.to_string(), "1.4.0");

    let release_env = env(&[("RELEASE", "1"), ("BUILD_TIMESTAMP", "20240115")]);
    let props = Properties::new();
    let inputs = ResolutionInputs::new(&release_env, &props);
    let resolution = resolve_version(&ResolutionPolicy::default(), &inputs);
    assert_eq!(resolution.spec.to_string(), "0.0.0");
}

#[test]
fn git_failure_proceeds_to_version_file() {
    let env = Environment::new();
    let props = Properties::new();
    let file = Properties::parse("VERSION_MAJOR=5\nVERSION_MINOR=0\nVERSION_PATCH=2");
    let inputs = ResolutionInputs::new(&env, &props)
        .with_git(&BrokenGit)
        .with_version_file(&file);

    let resolution = resolve_version(&ResolutionPolicy::default(), &inputs);
    assert_eq!(resolution.source, VersionSource::VersionFile);
    assert_eq!(resolution.spec.triple(), VersionTriple::new(5, 0, 2));
    assert!(
        resolution
            .fallbacks
            .iter()
            .any(|f| matches!(f, SourceUnavailable::GitFailed(GitError::NotInstalled(_))))
    );
}

#[test]
fn repository_without_release_tags_proceeds_to_version_file() {
    let env = Environment::new();
    let props = Properties::new();
    let file = Properties::parse("VERSION_PATCH=9");
    let git = StaticGit {
        exact: None,
        tags: vec!["v3.0.0-beta.1", "", "nightly"],
    };
    let inputs = ResolutionInputs::new(&env, &props)
        .with_git(&git)
        .with_version_file(&file);

    let resolution = resolve_version(&ResolutionPolicy::default(), &inputs);
    assert_eq!(resolution.source, VersionSource::VersionFile);
    assert_eq!(resolution.spec.triple(), VersionTriple::new(0, 0, 9));
    assert!(
        resolution
            .fallbacks
            .contains(&SourceUnavailable::NoReleaseTag("v*".to_string()))
    );
}

#[test]
fn malformed_version_file_value_defaults_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("version.properties");
    fs::write(
        &path,
        "VERSION_CODE=31\nVERSION_MAJOR=abc\nVERSION_MINOR=8\nVERSION_PATCH=1\nIS_BETA=true\n",
    )
    .unwrap();
    let file = Properties::load(&path).unwrap().unwrap();

    let env = Environment::new();
    let props = Properties::new();
    let inputs = ResolutionInputs::new(&env, &props).with_version_file(&file);

    let resolution = resolve_version(&ResolutionPolicy::version_file_driven(), &inputs);
    assert_eq!(resolution.spec.triple(), VersionTriple::new(0, 8, 1));
    assert_eq!(resolution.spec.build_number, 31);
    assert!(resolution.spec.is_prerelease);
}
