//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Resolve through the context, then print to stdout
//!
//! Diagnostics go through `tracing` (stderr); stdout carries only the
//! requested value so build scripts can capture it.

pub mod artifact;
pub mod build_number;
pub mod completions;
pub mod explain;
pub mod fields;
pub mod resolve;
