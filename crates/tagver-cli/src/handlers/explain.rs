//! Explain command handler.
//!
//! The diagnostic view: every field, where it came from, and each source
//! that was skipped on the way.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::render_explain;

/// Execute the explain command.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let resolution = ctx.resolve();
    println!("{}", render_explain(&resolution));
    Ok(())
}
