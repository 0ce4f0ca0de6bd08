//! Artifact name command handler.

use anyhow::{Result, bail};
use tagver_core::{BuildType, artifact_file_name};

use crate::bootstrap::CliContext;

/// Print `{app-id}-{version}-{build-type}.{extension}` for this build.
pub fn execute(ctx: &CliContext, app_id: &str, build_type: BuildType, extension: &str) -> Result<()> {
    println!("{}", render(ctx, app_id, build_type, extension)?);
    Ok(())
}

/// The artifact file name, failing on a blank application id.
pub fn render(ctx: &CliContext, app_id: &str, build_type: BuildType, extension: &str) -> Result<String> {
    let app_id = app_id.trim();
    if app_id.is_empty() {
        bail!("application id cannot be empty");
    }
    let resolution = ctx.resolve();
    Ok(artifact_file_name(app_id, &resolution.spec, build_type, extension))
}
