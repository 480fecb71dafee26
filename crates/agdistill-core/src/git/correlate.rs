use agdistill_types::{DiffHunk, HookEvent, HookPayload, RawEvent};
use std::path::Path;
use tracing::debug;

use crate::path::{match_relative_paths, repo_relative_path, PathMatch};

pub const DEFAULT_EDIT_TOOLS: &[&str] = &["Edit", "Write", "MultiEdit"];

/// A file-writing tool invocation that may have produced a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCall {
    pub t: i64,
    pub tool_use_id: String,
    pub file_path: String,
    /// `file_path` relative to the project directory, resolved once
    pub rel_path: String,
}

/// File-writing `PreToolUse` calls of one session, newest first
pub fn edit_calls(
    session_id: &str,
    events: &[RawEvent],
    edit_tools: &[String],
    project_dir: &Path,
) -> Vec<EditCall> {
    let mut calls: Vec<EditCall> = events
        .iter()
        .filter(|raw| raw.sid == session_id)
        .filter_map(|raw| HookEvent::from_raw(raw).ok())
        .filter_map(|event| match event.payload {
            HookPayload::PreToolUse(tool) if edit_tools.iter().any(|t| *t == tool.tool_name) => {
                let file_path = tool.file_path()?.to_string();
                Some(EditCall {
                    t: event.t,
                    rel_path: repo_relative_path(&file_path, project_dir),
                    file_path,
                    tool_use_id: tool.tool_use_id?,
                })
            }
            _ => None,
        })
        .collect();

    // Stable sort, then reverse: newest first, later log position first on ties
    calls.sort_by_key(|c| c.t);
    calls.reverse();
    calls
}

/// Links hunks to the edit calls that produced them.
///
/// Each hunk takes the most recent unused call whose path matches, preferring
/// a path-suffix match over a bare file-name match. A call that matched once
/// is not offered to later hunks, so commits should be fed oldest first and
/// the working tree last.
pub struct HunkCorrelator<'a> {
    calls: &'a [EditCall],
    used: Vec<bool>,
}

impl<'a> HunkCorrelator<'a> {
    pub fn new(calls: &'a [EditCall]) -> Self {
        Self {
            calls,
            used: vec![false; calls.len()],
        }
    }

    /// Correlate `hunks`, considering only calls made at or before
    /// `not_after` (epoch ms) when it is set
    pub fn correlate<'h>(
        &mut self,
        hunks: impl IntoIterator<Item = &'h mut DiffHunk>,
        not_after: Option<i64>,
    ) {
        for hunk in hunks {
            let best = self
                .calls
                .iter()
                .enumerate()
                .filter(|(idx, call)| {
                    !self.used[*idx] && not_after.is_none_or(|limit| call.t <= limit)
                })
                .filter_map(|(idx, call)| {
                    match_relative_paths(&call.rel_path, &hunk.file_path).map(|m| (m, idx))
                })
                // min_by_key keeps the first (newest) call among equal strengths
                .min_by_key(|(strength, _)| *strength);

            if let Some((strength, idx)) = best {
                if strength == PathMatch::Basename {
                    debug!(file = %hunk.file_path, "correlated by file name only");
                }
                self.used[idx] = true;
                hunk.matched_tool_use_id = Some(self.calls[idx].tool_use_id.clone());
            }
        }
    }
}
