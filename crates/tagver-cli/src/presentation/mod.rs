//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: everything it prints has already been
//! decided by the resolver.

pub mod report;

pub use report::{ResolutionReport, render_explain};
