use agdistill_types::{GitCommit, GitDiffResult, HookEventKind, RawEvent};
use std::path::Path;
use tracing::{debug, warn};

use super::correlate::{edit_calls, HunkCorrelator, DEFAULT_EDIT_TOOLS};
use super::log::{parse_log_output, LOG_FORMAT};
use super::numstat::parse_numstat_output;
use super::runner::GitRunner;
use crate::Result;

/// Hash of the empty tree, used as the "parent" of a root commit
const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// `[start_t, end_t]` of a session from its boundary events.
///
/// `SessionStart`/`SessionEnd` when present (first start, last end), else
/// the first/last timestamp of the session's events. `None` when the
/// session has no events.
pub fn session_window(session_id: &str, events: &[RawEvent]) -> Option<(i64, i64)> {
    let session: Vec<&RawEvent> = events.iter().filter(|e| e.sid == session_id).collect();

    let first = session.iter().map(|e| e.t).min()?;
    let last = session.iter().map(|e| e.t).max()?;

    let start = session
        .iter()
        .filter(|e| e.event == HookEventKind::SessionStart.as_str())
        .map(|e| e.t)
        .min()
        .unwrap_or(first);
    let end = session
        .iter()
        .filter(|e| e.event == HookEventKind::SessionEnd.as_str())
        .map(|e| e.t)
        .max()
        .unwrap_or(last);

    Some((start, end.max(start)))
}

/// Drives one extraction through a [`GitRunner`]
pub struct GitDiffExtractor<R: GitRunner> {
    runner: R,
    edit_tools: Vec<String>,
}

impl<R: GitRunner> GitDiffExtractor<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            edit_tools: DEFAULT_EDIT_TOOLS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Tool names whose `tool_input.file_path` can explain a diff
    pub fn with_edit_tools(mut self, edit_tools: Vec<String>) -> Self {
        self.edit_tools = edit_tools;
        self
    }

    pub fn extract(
        &self,
        session_id: &str,
        project_dir: &Path,
        events: &[RawEvent],
    ) -> Result<GitDiffResult> {
        let Some((start_t, end_t)) = session_window(session_id, events) else {
            debug!(session_id, "no events for session, skipping git diff");
            return Ok(GitDiffResult::default());
        };

        if !project_dir.is_dir() {
            debug!(dir = %project_dir.display(), "project dir missing");
            return Ok(GitDiffResult::default());
        }

        let inside = self
            .runner
            .run(project_dir, &["rev-parse", "--is-inside-work-tree"])?;
        if !inside.success || inside.stdout.trim() != "true" {
            debug!(dir = %project_dir.display(), "not a git work tree");
            return Ok(GitDiffResult::default());
        }

        let head = self
            .runner
            .run(project_dir, &["rev-parse", "--verify", "--quiet", "HEAD"])?;
        if !head.success {
            debug!(dir = %project_dir.display(), "repository has no commits");
            return Ok(GitDiffResult::default());
        }

        let log = self.runner.run(project_dir, &["log", LOG_FORMAT])?;
        if !log.success {
            warn!(stderr = %log.stderr.trim(), "git log failed");
            return Ok(GitDiffResult::default());
        }

        let mut commits: Vec<GitCommit> = parse_log_output(&log.stdout)
            .into_iter()
            .filter(|c| in_window(c.timestamp, start_t, end_t))
            .collect();
        if commits.is_empty() {
            debug!(session_id, start_t, end_t, "no commits inside session window");
            return Ok(GitDiffResult::default());
        }
        // git log lists newest first
        commits.sort_by_key(|c| c.timestamp);

        let calls = edit_calls(session_id, events, &self.edit_tools, project_dir);
        let mut correlator = HunkCorrelator::new(&calls);

        let mut hunks = Vec::new();
        for commit in &commits {
            let parent = commit.parents.first().map(String::as_str).unwrap_or(EMPTY_TREE);
            let diff = self
                .runner
                .run(project_dir, &["diff", "--numstat", parent, &commit.hash])?;
            if !diff.success {
                warn!(commit = %commit.short_hash(), stderr = %diff.stderr.trim(), "numstat failed, skipping commit");
                continue;
            }
            let mut commit_hunks = parse_numstat_output(&diff.stdout);
            for hunk in &mut commit_hunks {
                hunk.commit = Some(commit.hash.clone());
            }
            // Only edits made before the commit can have produced it
            let deadline = commit_deadline(commit.timestamp);
            correlator.correlate(commit_hunks.iter_mut(), Some(deadline));
            hunks.extend(commit_hunks);
        }

        let working = self.runner.run(project_dir, &["diff", "--numstat", "HEAD"])?;
        let mut working_tree_changes = if working.success {
            parse_numstat_output(&working.stdout)
        } else {
            warn!(stderr = %working.stderr.trim(), "working tree numstat failed");
            Vec::new()
        };
        correlator.correlate(working_tree_changes.iter_mut(), None);

        debug!(
            session_id,
            commits = commits.len(),
            hunks = hunks.len(),
            working_tree = working_tree_changes.len(),
            "git diff extracted"
        );

        Ok(GitDiffResult {
            commits,
            hunks,
            working_tree_changes: Some(working_tree_changes),
        })
    }
}

/// Latest edit time that can still belong to a commit stamped `commit_ms`.
/// Commit times are truncated to the second.
fn commit_deadline(commit_ms: i64) -> i64 {
    commit_ms + 999
}

/// Commit times have whole-second resolution, so the window start is
/// floored to its second
fn in_window(commit_ms: i64, start_t: i64, end_t: i64) -> bool {
    let start_floor = start_t.div_euclid(1000) * 1000;
    start_floor <= commit_ms && commit_ms <= end_t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitOutput;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers by joined argument string; records every call
    struct ScriptedGit {
        answers: HashMap<String, GitOutput>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedGit {
        fn new(answers: &[(&str, GitOutput)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(args, out)| (args.to_string(), out.clone()))
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl GitRunner for ScriptedGit {
        fn run(&self, _dir: &Path, args: &[&str]) -> Result<GitOutput> {
            let key = args.join(" ");
            self.calls.borrow_mut().push(key.clone());
            Ok(self
                .answers
                .get(&key)
                .cloned()
                .unwrap_or_else(|| GitOutput::failed(format!("unscripted: {}", key))))
        }
    }

    fn event(t: i64, name: &str, data: serde_json::Value) -> RawEvent {
        RawEvent {
            t,
            event: name.to_string(),
            sid: "s1".to_string(),
            data,
            context: None,
        }
    }

    fn session() -> Vec<RawEvent> {
        vec![
            event(1_700_000_000_000, "SessionStart", json!({})),
            event(
                1_700_000_100_000,
                "PreToolUse",
                json!({"tool_name": "Edit", "tool_use_id": "tu_edit", "tool_input": {"file_path": "/repo/src/lib.rs"}}),
            ),
            event(
                1_700_000_200_000,
                "PreToolUse",
                json!({"tool_name": "Write", "tool_use_id": "tu_write", "tool_input": {"file_path": "/repo/notes.md"}}),
            ),
            event(1_700_000_600_000, "SessionEnd", json!({})),
        ]
    }

    fn log_line(hash: &str, parent: &str, iso: &str, subject: &str) -> String {
        format!("{hash}\u{1f}{parent}\u{1f}{iso}\u{1f}Dev\u{1f}{subject}\n")
    }

    #[test]
    fn test_session_window_prefers_boundary_events() {
        let mut events = session();
        events.push(event(1_700_000_900_000, "Stop", json!({})));
        assert_eq!(
            session_window("s1", &events),
            Some((1_700_000_000_000, 1_700_000_600_000))
        );
        assert_eq!(session_window("missing", &events), None);
    }

    #[test]
    fn test_session_window_falls_back_to_event_range() {
        let events = vec![event(50, "PreToolUse", json!({})), event(10, "Stop", json!({}))];
        assert_eq!(session_window("s1", &events), Some((10, 50)));
    }

    #[test]
    fn test_in_window_floors_start_to_second() {
        assert!(in_window(1_000, 1_500, 2_000));
        assert!(!in_window(0, 1_500, 2_000));
        assert!(!in_window(3_000, 1_500, 2_999));
    }

    #[test]
    fn test_not_a_work_tree_is_empty() {
        let git = ScriptedGit::new(&[(
            "rev-parse --is-inside-work-tree",
            GitOutput::failed("fatal: not a git repository"),
        )]);
        let dir = std::env::temp_dir();
        let result = GitDiffExtractor::new(git).extract("s1", &dir, &session()).unwrap();
        assert_eq!(result, GitDiffResult::default());
    }

    #[test]
    fn test_no_commits_is_empty() {
        let git = ScriptedGit::new(&[
            ("rev-parse --is-inside-work-tree", GitOutput::ok("true\n")),
            ("rev-parse --verify --quiet HEAD", GitOutput::failed("")),
        ]);
        let dir = std::env::temp_dir();
        let result = GitDiffExtractor::new(git).extract("s1", &dir, &session()).unwrap();
        assert!(result.is_empty());
        assert!(result.working_tree_changes.is_none());
    }

    #[test]
    fn test_commits_outside_window_skip_working_tree() {
        let log = log_line("c0", "", "2020-01-01T00:00:00+00:00", "old work");
        let git = ScriptedGit::new(&[
            ("rev-parse --is-inside-work-tree", GitOutput::ok("true\n")),
            ("rev-parse --verify --quiet HEAD", GitOutput::ok("c0\n")),
            (format!("log {}", LOG_FORMAT).as_str(), GitOutput::ok(log)),
            ("diff --numstat HEAD", GitOutput::ok("5\t0\tsrc/lib.rs\n")),
        ]);
        let dir = std::env::temp_dir();
        let extractor = GitDiffExtractor::new(git);
        let result = extractor.extract("s1", &dir, &session()).unwrap();

        assert_eq!(result, GitDiffResult::default());
        assert!(
            !extractor
                .runner
                .calls
                .borrow()
                .iter()
                .any(|c| c.starts_with("diff"))
        );
    }

    #[test]
    fn test_in_window_commits_produce_correlated_hunks() {
        // c1 at +60s, c2 at +300s; c0 predates the session
        let log = [
            log_line("c2", "c1", "2023-11-14T22:18:20+00:00", "docs"),
            log_line("c1", "c0", "2023-11-14T22:14:20+00:00", "feature"),
            log_line("c0", "", "2023-11-01T00:00:00+00:00", "init"),
        ]
        .concat();
        let git = ScriptedGit::new(&[
            ("rev-parse --is-inside-work-tree", GitOutput::ok("true\n")),
            ("rev-parse --verify --quiet HEAD", GitOutput::ok("c2\n")),
            (format!("log {}", LOG_FORMAT).as_str(), GitOutput::ok(log)),
            ("diff --numstat c0 c1", GitOutput::ok("10\t2\tsrc/lib.rs\n")),
            ("diff --numstat c1 c2", GitOutput::ok("7\t0\tnotes.md\n")),
            ("diff --numstat HEAD", GitOutput::ok("1\t1\tsrc/lib.rs\n")),
        ]);
        // Tool paths live under /repo; suffix matching still links them
        let dir = std::env::temp_dir();
        let result = GitDiffExtractor::new(git).extract("s1", &dir, &session()).unwrap();

        let hashes: Vec<&str> = result.commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["c1", "c2"]);

        assert_eq!(result.hunks.len(), 2);
        assert_eq!(result.hunks[0].commit.as_deref(), Some("c1"));
        // The Edit of src/lib.rs at +100s came after c1
        assert!(result.hunks[0].matched_tool_use_id.is_none());
        assert_eq!(result.hunks[1].commit.as_deref(), Some("c2"));
        assert_eq!(result.hunks[1].matched_tool_use_id.as_deref(), Some("tu_write"));

        let working = result.working_tree_changes.unwrap();
        assert_eq!(working.len(), 1);
        assert_eq!(working[0].matched_tool_use_id.as_deref(), Some("tu_edit"));
    }

    #[test]
    fn test_edit_within_commit_second_counts_for_commit() {
        // Commit stamped +60s; the edit lands 400ms into that second
        let events = vec![
            event(1_700_000_000_000, "SessionStart", json!({})),
            event(
                1_700_000_060_400,
                "PreToolUse",
                json!({"tool_name": "Edit", "tool_use_id": "tu_same_second", "tool_input": {"file_path": "src/lib.rs"}}),
            ),
            event(1_700_000_600_000, "SessionEnd", json!({})),
        ];
        let log = log_line("c1", "c0", "2023-11-14T22:14:20+00:00", "feature");
        let git = ScriptedGit::new(&[
            ("rev-parse --is-inside-work-tree", GitOutput::ok("true\n")),
            ("rev-parse --verify --quiet HEAD", GitOutput::ok("c1\n")),
            (format!("log {}", LOG_FORMAT).as_str(), GitOutput::ok(log)),
            ("diff --numstat c0 c1", GitOutput::ok("4\t0\tsrc/lib.rs\n")),
            ("diff --numstat HEAD", GitOutput::ok("")),
        ]);
        let dir = std::env::temp_dir();
        let result = GitDiffExtractor::new(git).extract("s1", &dir, &events).unwrap();

        assert_eq!(
            result.hunks[0].matched_tool_use_id.as_deref(),
            Some("tu_same_second")
        );
    }

    #[test]
    fn test_root_commit_diffs_against_empty_tree() {
        let log = log_line("r0", "", "2023-11-14T22:14:20+00:00", "initial");
        let git = ScriptedGit::new(&[
            ("rev-parse --is-inside-work-tree", GitOutput::ok("true\n")),
            ("rev-parse --verify --quiet HEAD", GitOutput::ok("r0\n")),
            (format!("log {}", LOG_FORMAT).as_str(), GitOutput::ok(log)),
            (
                format!("diff --numstat {} r0", EMPTY_TREE).as_str(),
                GitOutput::ok("3\t0\tsrc/lib.rs\n"),
            ),
            ("diff --numstat HEAD", GitOutput::ok("")),
        ]);
        let dir = std::env::temp_dir();
        let result = GitDiffExtractor::new(git).extract("s1", &dir, &session()).unwrap();
        assert_eq!(result.hunks.len(), 1);
        assert_eq!(result.working_tree_changes, Some(vec![]));
    }
}
