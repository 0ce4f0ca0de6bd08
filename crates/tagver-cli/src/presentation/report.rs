//! Views of a [`Resolution`] for the terminal and for scripts.

use serde::Serialize;
use tagver_core::{Resolution, VersionSpec};

/// JSON-friendly view of a resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    /// Rendered version name.
    pub version: String,
    #[serde(flatten)]
    pub spec: VersionSpec,
    pub source: String,
    pub build_number_source: String,
    pub release_marked: bool,
    /// Skipped sources, in the order they were tried.
    pub fallbacks: Vec<String>,
}

impl From<&Resolution> for ResolutionReport {
    fn from(resolution: &Resolution) -> Self {
        Self {
            version: resolution.spec.version_name(),
            spec: resolution.spec.clone(),
            source: resolution.source.to_string(),
            build_number_source: resolution.build_number_source.to_string(),
            release_marked: resolution.release_marked,
            fallbacks: resolution.fallbacks.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Render a resolution as aligned `key = value` lines.
pub fn render_explain(resolution: &Resolution) -> String {
    let spec = &resolution.spec;
    let mut rows: Vec<(&str, String)> = vec![
        ("version", spec.version_name()),
        ("major", spec.major.to_string()),
        ("minor", spec.minor.to_string()),
        ("patch", spec.patch.to_string()),
        ("source", resolution.source.to_string()),
        ("prerelease", spec.is_prerelease.to_string()),
        (
            "prerelease_label",
            spec.prerelease_label.clone().unwrap_or_else(|| "-".to_string()),
        ),
        (
            "build_timestamp",
            spec.build_timestamp.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("release_marked", resolution.release_marked.to_string()),
        ("build_number", spec.build_number.to_string()),
        (
            "build_number_source",
            resolution.build_number_source.to_string(),
        ),
    ];
    if resolution.fallbacks.is_empty() {
        rows.push(("skipped", "-".to_string()));
    }

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("{key:<width$} = {value}"))
        .chain(
            resolution
                .fallbacks
                .iter()
                .map(|reason| format!("{:<width$} = {reason}", "skipped")),
        )
        .collect::<Vec<_>>()
        .join("\n")
}
