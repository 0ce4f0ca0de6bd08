//! Core domain for tagver: deterministic build version resolution.
//!
//! This crate is pure. It owns the version types, the [`ResolutionPolicy`],
//! the properties format and the [`GitQuery`] port; process execution lives
//! in `tagver-runtime` and is injected by callers.
//!
//! ```
//! use tagver_core::{Environment, Properties, ResolutionInputs, ResolutionPolicy, resolve_version};
//!
//! let env: Environment = [("BETA_VERSION".to_string(), "2.3.1".to_string()),
//!                         ("BUILD_TIMESTAMP".to_string(), "20240115".to_string())]
//!     .into_iter()
//!     .collect();
//! let build_properties = Properties::new();
//! let inputs = ResolutionInputs::new(&env, &build_properties);
//!
//! let resolution = resolve_version(&ResolutionPolicy::default(), &inputs);
//! assert_eq!(resolution.spec.to_string(), "2.3.1-beta.20240115");
//! ```
#![deny(unused_crate_dependencies)]

pub mod build_config;
pub mod error;
pub mod policy;
pub mod ports;
pub mod properties;
pub mod resolver;
pub mod version;

// Re-export commonly used types for convenience
pub use build_config::{
    BuildConfigField, BuildType, DEFAULT_ARTIFACT_EXTENSION, UnknownBuildType, application_id,
    artifact_file_name, build_config_fields,
};
pub use error::SourceUnavailable;
pub use policy::{OverridePrerelease, PolicyError, PrereleaseMode, ResolutionPolicy, SourceNames};
pub use ports::{GitError, GitQuery};
pub use properties::{Properties, PropertiesError, parse_flag};
pub use resolver::{
    BuildNumberSource, Environment, Resolution, ResolutionInputs, VersionSource, resolve_version,
};
pub use version::{DEFAULT_BUILD_NUMBER, VersionSpec, VersionTriple};
