//! `git` executable adapter.
//!
//! Each query is a single blocking `git -C <repo> ...` invocation with no
//! retry. Callers treat every error as "source absent".

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tagver_core::{GitError, GitQuery};
use tracing::debug;

/// stderr fragments git prints when HEAD simply has no tag.
const NO_TAG_MARKERS: [&str; 2] = ["no tag exactly matches", "No names found"];

/// [`GitQuery`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    repo_dir: PathBuf,
}

impl GitCli {
    /// Query the repository containing `repo_dir` with the `git` on `PATH`.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: OsString::from("git"),
            repo_dir: repo_dir.into(),
        }
    }

    /// Use a specific git executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Seven character abbreviation of the HEAD commit, if there is one.
    pub fn head_short_sha(&self) -> Option<String> {
        match self.run(&["rev-parse", "--short=7", "HEAD"]) {
            Ok(stdout) => normalize_sha_short(&stdout),
            Err(e) => {
                debug!(error = %e, "Could not read HEAD commit");
                None
            }
        }
    }

    /// `git -C <repo> args` with diagnostics forced to untranslated English.
    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.env("LC_ALL", "C").arg("-C").arg(&self.repo_dir).args(args);
        cmd
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        debug!(repo = %self.repo_dir.display(), "Running git {command}");

        let output = self
            .command(args)
            .output()
            .map_err(|e| GitError::NotInstalled(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("not a git repository") {
                return Err(GitError::NotARepository(
                    self.repo_dir.display().to_string(),
                ));
            }
            return Err(GitError::CommandFailed { command, stderr });
        }

        String::from_utf8(output.stdout).map_err(|_| GitError::InvalidOutput(command))
    }
}

impl GitQuery for GitCli {
    fn exact_tag_at_head(&self) -> Result<Option<String>, GitError> {
        match self.run(&["describe", "--exact-match", "--tags", "HEAD"]) {
            Ok(stdout) => {
                let tag = stdout.trim();
                Ok((!tag.is_empty()).then(|| tag.to_string()))
            }
            Err(GitError::CommandFailed { stderr, .. })
                if NO_TAG_MARKERS.iter().any(|m| stderr.contains(m)) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn tags_matching(&self, glob: &str) -> Result<Vec<String>, GitError> {
        let stdout = self.run(&["tag", "-l", glob, "--sort=-version:refname"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Version of the installed git, or `None` when it cannot be run.
pub fn has_git() -> Option<String> {
    match Command::new("git").arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let version = version
                .trim()
                .strip_prefix("git version ")
                .unwrap_or(version.trim())
                .to_string();
            Some(version)
        }
        _ => None,
    }
}

/// Nearest ancestor of `start` (inclusive) that contains a `.git` entry.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// Path of the branch ref `HEAD` points at, relative to the git dir.
///
/// `head` is the content of `.git/HEAD`; a detached HEAD yields `None`.
pub fn head_ref_path(head: &str) -> Option<PathBuf> {
    let target = head.trim().strip_prefix("ref:")?.trim();
    if target.is_empty() || target.split('/').any(|part| part == "..") {
        return None;
    }
    Some(target.split('/').collect())
}

/// Reduce a SHA to its first seven hex characters.
///
/// Returns `None` for anything shorter than seven characters or not hex.
pub fn normalize_sha_short(raw: &str) -> Option<String> {
    let candidate = raw.trim().get(..7)?;
    candidate
        .chars()
        .all(|c| c.is_ascii_hexdigit())
        .then(|| candidate.to_ascii_lowercase())
}
