//! Fields command handler.

use anyhow::Result;
use tagver_core::{BuildType, build_config_fields};
use tracing::debug;

use crate::bootstrap::CliContext;

/// Print one `NAME="value"` line per entry of the build type's properties.
pub fn execute(ctx: &CliContext, build_type: BuildType) -> Result<()> {
    let properties = ctx.build_type_properties(build_type);
    if properties.is_empty() {
        debug!(%build_type, "No build config fields");
    }
    for field in build_config_fields(&properties) {
        println!("{field}");
    }
    Ok(())
}
