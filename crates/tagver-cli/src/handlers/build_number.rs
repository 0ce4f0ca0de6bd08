//! Build number command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Print the resolved build number.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("{}", ctx.resolve().spec.build_number);
    Ok(())
}
