//! Build types, pass-through build constants and artifact naming.
//!
//! Every key of a per-build-type properties file (`config/debug.properties`,
//! `config/release.properties`) is forwarded to the build as a string
//! constant. The resolver never looks at these values.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::properties::Properties;
use crate::version::VersionSpec;

/// Default artifact extension.
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "apk";

/// Errors from parsing a build type name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown build type '{0}' (expected 'debug' or 'release')")]
pub struct UnknownBuildType(pub String);

/// Build variant being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    /// Suffix appended to the application id for this build type.
    #[must_use]
    pub const fn application_id_suffix(self) -> &'static str {
        match self {
            Self::Debug => ".debug",
            Self::Release => "",
        }
    }

    /// Location of this build type's properties file under `config_dir`.
    #[must_use]
    pub fn properties_path(self, config_dir: &Path) -> PathBuf {
        config_dir.join(format!("{}.properties", self.as_str()))
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = UnknownBuildType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err(UnknownBuildType(s.to_string())),
        }
    }
}

/// A string constant forwarded to the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfigField {
    pub name: String,
    pub value: String,
}

impl BuildConfigField {
    /// The value as a double-quoted literal with `\` and `"` escaped.
    #[must_use]
    pub fn quoted_value(&self) -> String {
        let mut quoted = String::with_capacity(self.value.len() + 2);
        quoted.push('"');
        for c in self.value.chars() {
            if c == '"' || c == '\\' {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');
        quoted
    }
}

impl fmt::Display for BuildConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.quoted_value())
    }
}

/// All properties of a build type's file as constants, in key order.
#[must_use]
pub fn build_config_fields(props: &Properties) -> Vec<BuildConfigField> {
    props
        .iter()
        .map(|(name, value)| BuildConfigField {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect()
}

/// Application id including the build type suffix.
#[must_use]
pub fn application_id(base: &str, build_type: BuildType) -> String {
    format!("{base}{}", build_type.application_id_suffix())
}

/// Output file name: `{app-id}-{version}-{build-type}.{extension}`.
///
/// Dots in the application id become dashes.
#[must_use]
pub fn artifact_file_name(
    base_application_id: &str,
    spec: &VersionSpec,
    build_type: BuildType,
    extension: &str,
) -> String {
    let app = application_id(base_application_id, build_type).replace('.', "-");
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        format!("{app}-{spec}-{build_type}")
    } else {
        format!("{app}-{spec}-{build_type}.{extension}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionTriple;

    #[test]
    fn test_build_type_parsing() {
        assert_eq!("Debug".parse::<BuildType>(), Ok(BuildType::Debug));
        assert_eq!("release".parse::<BuildType>(), Ok(BuildType::Release));
        assert!("staging".parse::<BuildType>().is_err());
    }

    #[test]
    fn test_properties_path() {
        let path = BuildType::Release.properties_path(Path::new("config"));
        assert_eq!(path, Path::new("config").join("release.properties"));
    }

    #[test]
    fn test_fields_are_quoted_and_escaped() {
        let props = Properties::parse("API_URL=https://example.com\nGREETING=say \"hi\"");
        let fields = build_config_fields(&props);
        let rendered: Vec<String> = fields.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                r#"API_URL="https://example.com""#.to_string(),
                r#"GREETING="say \"hi\"""#.to_string(),
            ]
        );
    }

    #[test]
    fn test_artifact_name_for_debug_build() {
        let spec = VersionSpec::release(VersionTriple::new(1, 2, 0))
            .with_prerelease("beta")
            .with_timestamp("20240115");
        let name = artifact_file_name(
            "toy.practice.app",
            &spec,
            BuildType::Debug,
            DEFAULT_ARTIFACT_EXTENSION,
        );
        assert_eq!(name, "toy-practice-app-debug-1.2.0-beta.20240115-debug.apk");
    }

    #[test]
    fn test_artifact_name_for_release_build() {
        let spec = VersionSpec::release(VersionTriple::new(2, 0, 1));
        let name = artifact_file_name("com.example.app", &spec, BuildType::Release, ".aab");
        assert_eq!(name, "com-example-app-2.0.1-release.aab");
    }
}
