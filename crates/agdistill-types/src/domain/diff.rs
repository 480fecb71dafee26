use serde::{Deserialize, Serialize};

/// Change kind, always derived from the line counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
}

impl FileStatus {
    pub fn from_counts(additions: u32, deletions: u32) -> Self {
        match (additions, deletions) {
            (a, 0) if a > 0 => FileStatus::Added,
            (0, d) if d > 0 => FileStatus::Deleted,
            _ => FileStatus::Modified,
        }
    }
}

/// Per-file line counts from a numstat diff.
///
/// Used both for committed hunks (`commit` set) and for uncommitted
/// working-tree changes (`commit` unset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "DiffHunkRecord", from = "DiffHunkRecord")]
pub struct DiffHunk {
    pub file_path: String,
    pub additions: u32,
    pub deletions: u32,
    pub commit: Option<String>,
    pub matched_tool_use_id: Option<String>,
}

/// Working-tree changes share the hunk shape
pub type WorkingTreeChange = DiffHunk;

impl DiffHunk {
    pub fn new(file_path: impl Into<String>, additions: u32, deletions: u32) -> Self {
        Self {
            file_path: file_path.into(),
            additions,
            deletions,
            commit: None,
            matched_tool_use_id: None,
        }
    }

    pub fn status(&self) -> FileStatus {
        FileStatus::from_counts(self.additions, self.deletions)
    }
}

// Wire shape: status is emitted for consumers but never read back
#[derive(Serialize, Deserialize)]
struct DiffHunkRecord {
    file_path: String,
    #[serde(default, skip_deserializing)]
    status: Option<FileStatus>,
    additions: u32,
    deletions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    matched_tool_use_id: Option<String>,
}

impl From<DiffHunk> for DiffHunkRecord {
    fn from(hunk: DiffHunk) -> Self {
        DiffHunkRecord {
            status: Some(hunk.status()),
            file_path: hunk.file_path,
            additions: hunk.additions,
            deletions: hunk.deletions,
            commit: hunk.commit,
            matched_tool_use_id: hunk.matched_tool_use_id,
        }
    }
}

impl From<DiffHunkRecord> for DiffHunk {
    fn from(record: DiffHunkRecord) -> Self {
        DiffHunk {
            file_path: record.file_path,
            additions: record.additions,
            deletions: record.deletions,
            commit: record.commit,
            matched_tool_use_id: record.matched_tool_use_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommit {
    pub hash: String,
    /// Epoch milliseconds of the committer date
    pub timestamp: i64,
    pub author: String,
    pub subject: String,
    /// Parent hashes; empty for a root commit
    #[serde(default)]
    pub parents: Vec<String>,
}

impl GitCommit {
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

/// Commits and file changes attributed to one session window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitDiffResult {
    pub commits: Vec<GitCommit>,
    pub hunks: Vec<DiffHunk>,
    /// Only computed when at least one commit falls inside the window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_tree_changes: Option<Vec<WorkingTreeChange>>,
}

impl GitDiffResult {
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
            && self.hunks.is_empty()
            && self
                .working_tree_changes
                .as_ref()
                .is_none_or(|changes| changes.is_empty())
    }
}
