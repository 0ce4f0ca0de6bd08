//! Resolve command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::ResolutionReport;

/// Print the resolved version name, or the whole resolution as JSON.
pub fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    println!("{}", render(ctx, json)?);
    Ok(())
}

/// The text `execute` prints.
pub fn render(ctx: &CliContext, json: bool) -> Result<String> {
    let resolution = ctx.resolve();
    if json {
        let report = ResolutionReport::from(&resolution);
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(resolution.spec.to_string())
    }
}
