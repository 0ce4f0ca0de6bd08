//! Git query port.
//!
//! The resolver only ever asks two questions of a repository. Both are
//! best-effort: any error is treated by the caller as "source absent".

use thiserror::Error;

/// Errors a git adapter may report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitError {
    /// The `git` executable could not be started.
    #[error("git is not available: {0}")]
    NotInstalled(String),

    /// The working directory is not inside a git repository.
    #[error("{0} is not a git repository")]
    NotARepository(String),

    /// git ran but exited unsuccessfully.
    #[error("`git {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// git produced output that is not valid UTF-8.
    #[error("`git {0}` produced non UTF-8 output")]
    InvalidOutput(String),
}

/// Read-only questions the resolver asks of a git repository.
///
/// Implementations must not retry; one failed call is final for that source.
#[cfg_attr(test, mockall::automock)]
pub trait GitQuery: Send + Sync {
    /// The tag that names the current commit exactly, if any.
    ///
    /// Returns `Ok(None)` when HEAD is not tagged.
    fn exact_tag_at_head(&self) -> Result<Option<String>, GitError>;

    /// All tags matching `glob`, ordered by version, newest first.
    fn tags_matching(&self, glob: &str) -> Result<Vec<String>, GitError>;
}
