use std::{env, fs};
use std::path::{Path, PathBuf};

use tagver_core::{
    BuildType, Properties, ResolutionInputs, ResolutionPolicy, VersionTriple, resolve_version,
};
use tagver_runtime::{
    GitCli, find_repo_root, has_git, head_ref_path, normalize_sha_short, process_environment,
};

fn main() {
    // Always rerun when this build script changes.
    println!("cargo:rerun-if-changed=build.rs");

    // Allow CI or packagers to provide a SHA without any git probing.
    println!("cargo:rerun-if-env-changed=TAGVER_BUILD_SHA_SHORT");

    let policy = policy();
    for name in [
        &policy.names.override_env,
        &policy.names.build_number_env,
        &policy.names.timestamp_env,
        &policy.names.release_env,
    ] {
        println!("cargo:rerun-if-env-changed={name}");
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let repo_root = find_repo_root(&manifest_dir);
    let git = repo_root
        .as_deref()
        .filter(|_| has_git().is_some())
        .map(GitCli::new);

    if let Some(root) = &repo_root {
        watch_git_state(root);
    }

    let sha = env::var("TAGVER_BUILD_SHA_SHORT")
        .ok()
        .and_then(|s| normalize_sha_short(&s))
        .or_else(|| git.as_ref().and_then(GitCli::head_short_sha));

    let version_file_path = repo_root
        .as_deref()
        .unwrap_or(&manifest_dir)
        .join("version.properties");
    if version_file_path.exists() {
        println!("cargo:rerun-if-changed={}", version_file_path.display());
    }
    let version_file = match Properties::load(&version_file_path) {
        Ok(file) => file,
        Err(err) => {
            println!("cargo:warning=tagver-build-info: {err}");
            None
        }
    };

    // Release profile builds count as release-marked.
    let mut build_properties = Properties::new();
    if build_type() == BuildType::Release {
        build_properties.insert(policy.names.release_property.clone(), String::new());
    }

    let env = process_environment();
    let mut inputs = ResolutionInputs::new(&env, &build_properties);
    if let Some(file) = &version_file {
        inputs = inputs.with_version_file(file);
    }
    if let Some(git) = &git {
        inputs = inputs.with_git(git);
    }
    let resolution = resolve_version(&policy, &inputs);

    // These are the env vars the crate uses via `env!()`.
    // They MUST always be set, or compilation will fail.
    println!("cargo:rustc-env=TAGVER_RESOLVED_VERSION={}", resolution.spec);
    println!(
        "cargo:rustc-env=TAGVER_BUILD_NUMBER={}",
        resolution.spec.build_number
    );
    println!(
        "cargo:rustc-env=TAGVER_GIT_SHA={}",
        sha.as_deref().unwrap_or("unknown")
    );
}

/// Package version as the fallback triple, so an untagged checkout still
/// reports the manifest version.
fn policy() -> ResolutionPolicy {
    let fallback = VersionTriple::parse_lenient(&env::var("CARGO_PKG_VERSION").unwrap_or_default());
    ResolutionPolicy {
        default_major: fallback.major,
        default_minor: fallback.minor,
        default_patch: fallback.patch,
        ..ResolutionPolicy::default()
    }
}

fn build_type() -> BuildType {
    env::var("PROFILE")
        .ok()
        .and_then(|profile| profile.parse().ok())
        .unwrap_or(BuildType::Debug)
}

/// Re-run when HEAD moves or tags change.
///
/// On a branch checkout a commit only rewrites the branch ref, so the ref
/// HEAD points at is watched as well.
fn watch_git_state(repo_root: &Path) {
    let git_dir = repo_root.join(".git");
    let mut watched: Vec<PathBuf> = ["HEAD", "refs/tags", "packed-refs"]
        .iter()
        .map(|entry| git_dir.join(entry))
        .collect();
    if let Some(branch_ref) = fs::read_to_string(git_dir.join("HEAD"))
        .ok()
        .and_then(|head| head_ref_path(&head))
    {
        watched.push(git_dir.join(branch_ref));
    }

    for path in watched.iter().filter(|path| path.exists()) {
        println!("cargo:rerun-if-changed={}", path.display());
    }
}
