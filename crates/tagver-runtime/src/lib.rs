//! Process and OS-level adapters for tagver.
//!
//! Everything that touches the outside world lives here so that
//! `tagver-core` stays pure: the `git` executable behind the
//! [`GitQuery`](tagver_core::GitQuery) port, and snapshots of the process
//! environment.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod environment;
pub mod git;

pub use environment::process_environment;
pub use git::{GitCli, find_repo_root, has_git, head_ref_path, normalize_sha_short};
