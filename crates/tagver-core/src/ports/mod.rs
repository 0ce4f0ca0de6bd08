//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define what the resolver expects from infrastructure. They contain
//! no process or filesystem details; adapters live in `tagver-runtime`.

pub mod git;

pub use git::{GitError, GitQuery};

#[cfg(test)]
pub use git::MockGitQuery;
