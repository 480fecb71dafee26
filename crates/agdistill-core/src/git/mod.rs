//! Git diff correlation.
//!
//! Maps a session's time window onto the commits made during it, the
//! per-file line counts of those commits and of the still-uncommitted
//! working tree, and links each changed file back to the Edit/Write call
//! that most plausibly produced it.
//!
//! All calls into git go through [`GitRunner`] and are issued one after
//! another; the extraction assumes nobody mutates the repository meanwhile.

mod correlate;
mod extract;
mod log;
mod numstat;
mod runner;

pub use correlate::{edit_calls, EditCall, HunkCorrelator, DEFAULT_EDIT_TOOLS};
pub use extract::{session_window, GitDiffExtractor};
pub use log::{parse_log_output, LOG_FORMAT};
pub use numstat::parse_numstat_output;
pub use runner::{GitOutput, GitRunner, SystemGit};

use agdistill_types::{GitDiffResult, RawEvent};
use std::path::Path;

use crate::Result;

/// Extract commits, hunks and working-tree changes for one session using the
/// system `git`.
///
/// Returns an empty result when `project_dir` is not a repository, has no
/// commits, or has no commits inside the session window. Only a failure to
/// start git at all is an error.
pub fn extract_git_diff(
    session_id: &str,
    project_dir: &Path,
    events: &[RawEvent],
) -> Result<GitDiffResult> {
    GitDiffExtractor::new(SystemGit::default()).extract(session_id, project_dir, events)
}
