use std::path::{Path, PathBuf};

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Normalize a path for comparison (resolve to absolute, canonicalize if possible)
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

/// Express a tool's `file_path` relative to the repository root.
///
/// Absolute paths under `project_dir` (as given, or canonicalized, which
/// matters on macOS where `/var` links to `/private/var`) lose the prefix.
/// Anything else is returned with a leading `./` stripped.
pub fn repo_relative_path(file_path: &str, project_dir: &Path) -> String {
    let path = Path::new(file_path);

    if path.is_absolute() {
        if let Ok(rel) = path.strip_prefix(project_dir) {
            return to_slash(rel);
        }
        let canonical_root = normalize_path(project_dir);
        if let Ok(rel) = normalize_path(path).strip_prefix(&canonical_root) {
            return to_slash(rel);
        }
        if let Ok(rel) = path.strip_prefix(&canonical_root) {
            return to_slash(rel);
        }
    }

    file_path.trim_start_matches("./").to_string()
}

/// How confidently a tool path refers to a diffed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PathMatch {
    /// Same repository-relative path, or one is a path-suffix of the other
    Suffix,
    /// Only the file names agree
    Basename,
}

/// Compare a tool's `file_path` with a repository-relative diff path
pub fn match_paths(tool_path: &str, diff_path: &str, project_dir: &Path) -> Option<PathMatch> {
    match_relative_paths(&repo_relative_path(tool_path, project_dir), diff_path)
}

/// Like [`match_paths`] for a tool path already passed through
/// [`repo_relative_path`]; never touches the filesystem
pub fn match_relative_paths(rel: &str, diff_path: &str) -> Option<PathMatch> {
    if rel == diff_path
        || rel.ends_with(&format!("/{}", diff_path))
        || diff_path.ends_with(&format!("/{}", rel))
    {
        return Some(PathMatch::Suffix);
    }

    match (basename(rel), basename(diff_path)) {
        (Some(a), Some(b)) if a == b => Some(PathMatch::Basename),
        _ => None,
    }
}

fn basename(path: &str) -> Option<&str> {
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_relative_strips_root() {
        let root = Path::new("/work/repo");
        assert_eq!(repo_relative_path("/work/repo/src/lib.rs", root), "src/lib.rs");
        assert_eq!(repo_relative_path("./src/lib.rs", root), "src/lib.rs");
        assert_eq!(repo_relative_path("/elsewhere/lib.rs", root), "/elsewhere/lib.rs");
    }

    #[test]
    fn test_match_paths() {
        let root = Path::new("/work/repo");
        assert_eq!(
            match_paths("/work/repo/src/lib.rs", "src/lib.rs", root),
            Some(PathMatch::Suffix)
        );
        assert_eq!(
            match_paths("/other/checkout/src/lib.rs", "src/lib.rs", root),
            Some(PathMatch::Suffix)
        );
        assert_eq!(
            match_paths("lib.rs", "src/lib.rs", root),
            Some(PathMatch::Suffix)
        );
        assert_eq!(
            match_paths("/tmp/scratch/lib.rs", "src/lib.rs", root),
            Some(PathMatch::Basename)
        );
        assert_eq!(match_paths("/work/repo/src/main.rs", "src/lib.rs", root), None);
    }

    #[test]
    fn test_match_relative_paths() {
        assert_eq!(match_relative_paths("src/lib.rs", "src/lib.rs"), Some(PathMatch::Suffix));
        assert_eq!(
            match_relative_paths("/elsewhere/src/lib.rs", "src/lib.rs"),
            Some(PathMatch::Suffix)
        );
        assert_eq!(match_relative_paths("tmp/lib.rs", "src/lib.rs"), Some(PathMatch::Basename));
        assert_eq!(match_relative_paths("src/main.rs", "src/lib.rs"), None);
    }

    #[test]
    fn test_suffix_requires_segment_boundary() {
        let root = Path::new("/work/repo");
        assert_eq!(match_paths("/work/repo/src/xlib.rs", "lib.rs", root), None);
    }

    #[test]
    fn test_suffix_outranks_basename() {
        assert!(PathMatch::Suffix < PathMatch::Basename);
    }
}
