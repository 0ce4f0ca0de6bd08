//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where ambient state enters the program:
//! - the process environment (snapshotted once)
//! - properties files on disk
//! - the `git` executable (via tagver-runtime)
//!
//! Handlers receive a [`CliContext`] and never look anything up themselves.

use std::fs;
use std::path::{Path, PathBuf};

use tagver_core::{
    BuildType, Environment, Properties, Resolution, ResolutionInputs, ResolutionPolicy,
    resolve_version,
};
use tagver_runtime::{GitCli, has_git, process_environment};
use tracing::{debug, warn};

use crate::error::CliError;
use crate::parser::{PolicyArgs, SourceArgs};

/// Default name of the version-tracking file inside the repository.
pub const VERSION_FILE_NAME: &str = "version.properties";

/// Default name of the build-type config directory inside the repository.
pub const CONFIG_DIR_NAME: &str = "config";

/// Bootstrap configuration for the CLI, with every default filled in.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory git is queried in.
    pub repo: PathBuf,
    /// Whether git may be queried.
    pub use_git: bool,
    /// Version-tracking properties file.
    pub version_file: PathBuf,
    /// Directory holding `<build-type>.properties`.
    pub config_dir: PathBuf,
    /// Build properties from `-P` and `--release`.
    pub build_properties: Properties,
    /// Effective resolution policy.
    pub policy: ResolutionPolicy,
}

impl CliConfig {
    /// Build the configuration from parsed arguments.
    ///
    /// Fails only for problems with what the user named explicitly: an
    /// unreadable or invalid policy file, or a malformed `-P` flag.
    pub fn from_args(sources: &SourceArgs, policy_args: &PolicyArgs) -> Result<Self, CliError> {
        let policy = load_policy(policy_args)?;

        let mut build_properties = parse_build_properties(&sources.properties)?;
        if sources.release {
            build_properties.insert(policy.names.release_property.clone(), String::new());
        }

        let version_file = sources
            .version_file
            .clone()
            .unwrap_or_else(|| sources.repo.join(VERSION_FILE_NAME));
        let config_dir = sources
            .config_dir
            .clone()
            .unwrap_or_else(|| sources.repo.join(CONFIG_DIR_NAME));

        Ok(Self {
            repo: sources.repo.clone(),
            use_git: !sources.no_git,
            version_file,
            config_dir,
            build_properties,
            policy,
        })
    }
}

/// Parse `KEY` / `KEY=VALUE` build property flags.
///
/// A bare key gets an empty value; presence is what matters for markers.
pub fn parse_build_properties(raw: &[String]) -> Result<Properties, CliError> {
    let mut properties = Properties::new();
    for entry in raw {
        let (key, value) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::Arguments(format!(
                "build property '{entry}' has an empty key"
            )));
        }
        properties.insert(key, value.trim());
    }
    Ok(properties)
}

/// Load the policy file (if any) and apply flag overrides on top.
pub fn load_policy(args: &PolicyArgs) -> Result<ResolutionPolicy, CliError> {
    let mut policy = match &args.policy_file {
        Some(path) => read_policy_file(path)?,
        None => ResolutionPolicy::default(),
    };

    if let Some(major) = args.default_major {
        policy.default_major = major;
    }
    if let Some(minor) = args.default_minor {
        policy.default_minor = minor;
    }
    if let Some(patch) = args.default_patch {
        policy.default_patch = patch;
    }
    if let Some(mode) = args.prerelease_mode {
        policy.prerelease_mode = mode;
    }
    if let Some(behaviour) = args.override_prerelease {
        policy.override_prerelease = behaviour;
    }
    if let Some(label) = &args.prerelease_label {
        policy.prerelease_label.clone_from(label);
    }
    if let Some(glob) = &args.tag_glob {
        policy.release_tag_glob.clone_from(glob);
    }
    if let Some(prefix) = &args.tag_prefix {
        policy.tag_prefix.clone_from(prefix);
    }

    if policy.prerelease_label.trim().is_empty() {
        return Err(CliError::Config(
            "prerelease label cannot be empty".to_string(),
        ));
    }
    Ok(policy)
}

fn read_policy_file(path: &Path) -> Result<ResolutionPolicy, CliError> {
    let content = fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
}

/// Read a properties file that is allowed to be missing or unreadable.
fn load_optional(path: &Path) -> Option<Properties> {
    match Properties::load(path) {
        Ok(Some(props)) => Some(props),
        Ok(None) => {
            debug!(path = %path.display(), "Properties file not found");
            None
        }
        Err(e) => {
            warn!("{e}; ignoring it");
            None
        }
    }
}

/// Fully composed inputs for CLI commands.
pub struct CliContext {
    config: CliConfig,
    env: Environment,
    version_file: Option<Properties>,
    git: Option<GitCli>,
}

impl CliContext {
    /// Compose a context from configuration and an environment snapshot.
    pub fn new(config: CliConfig, env: Environment) -> Self {
        let version_file = load_optional(&config.version_file);

        let git = if config.use_git {
            if let Some(version) = has_git() {
                debug!(%version, "Using git");
                Some(GitCli::new(&config.repo))
            } else {
                debug!("git executable not found");
                None
            }
        } else {
            debug!("git disabled by --no-git");
            None
        };

        Self {
            config,
            env,
            version_file,
            git,
        }
    }

    /// Access the effective policy.
    pub const fn policy(&self) -> &ResolutionPolicy {
        &self.config.policy
    }

    /// Resolve the version from this context's inputs.
    pub fn resolve(&self) -> Resolution {
        let mut inputs = ResolutionInputs::new(&self.env, &self.config.build_properties);
        if let Some(file) = &self.version_file {
            inputs = inputs.with_version_file(file);
        }
        if let Some(git) = &self.git {
            inputs = inputs.with_git(git);
        }
        resolve_version(&self.config.policy, &inputs)
    }

    /// Properties of `<config-dir>/<build-type>.properties`, empty if absent.
    pub fn build_type_properties(&self, build_type: BuildType) -> Properties {
        load_optional(&build_type.properties_path(&self.config.config_dir)).unwrap_or_default()
    }
}

/// Bootstrap the CLI application against the real process environment.
pub fn bootstrap(config: CliConfig) -> CliContext {
    CliContext::new(config, process_environment())
}
