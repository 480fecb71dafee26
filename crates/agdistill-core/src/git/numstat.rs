use agdistill_types::DiffHunk;
use regex::Regex;
use std::sync::LazyLock;

// "src/{old.rs => new.rs}" and "{a => b}/lib.rs"
static BRACE_RENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\{(.*) => (.*)\}(.*)$").unwrap());

/// Parse `git diff --numstat` output.
///
/// Each line is `<additions>\t<deletions>\t<path>`. Non-numeric counts (`-`
/// for binary files) read as 0. Lines without a path are dropped. Renames
/// resolve to the destination path.
pub fn parse_numstat_output(text: &str) -> Vec<DiffHunk> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<DiffHunk> {
    let mut fields = line.splitn(3, '\t');
    let additions = fields.next()?;
    let deletions = fields.next()?;
    let path = fields.next()?.trim();
    if path.is_empty() {
        return None;
    }

    Some(DiffHunk::new(
        rename_target(path),
        parse_count(additions),
        parse_count(deletions),
    ))
}

fn parse_count(field: &str) -> u32 {
    field.trim().parse().unwrap_or(0)
}

fn rename_target(path: &str) -> String {
    if let Some(caps) = BRACE_RENAME.captures(path) {
        let joined = format!("{}{}{}", &caps[1], &caps[3], &caps[4]);
        // "src/{ => sub}/a.rs" leaves a doubled separator behind
        return joined.replace("//", "/");
    }
    match path.split_once(" => ") {
        Some((_, target)) => target.to_string(),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agdistill_types::FileStatus;

    #[test]
    fn test_modified_line() {
        let hunks = parse_numstat_output("10\t5\tsrc/index.ts");
        assert_eq!(hunks, vec![DiffHunk::new("src/index.ts", 10, 5)]);
        assert_eq!(hunks[0].status(), FileStatus::Modified);
    }

    #[test]
    fn test_added_and_deleted() {
        let hunks = parse_numstat_output("15\t0\tf\n0\t20\tg\n");
        assert_eq!(hunks[0].status(), FileStatus::Added);
        assert_eq!(hunks[1].status(), FileStatus::Deleted);
    }

    #[test]
    fn test_binary_counts_are_zero() {
        let hunks = parse_numstat_output("-\t-\tassets/logo.png");
        assert_eq!(hunks, vec![DiffHunk::new("assets/logo.png", 0, 0)]);
        assert_eq!(hunks[0].status(), FileStatus::Modified);
    }

    #[test]
    fn test_lines_without_path_are_dropped() {
        let hunks = parse_numstat_output("3\t4\n3\t4\t\n1\t1\tkept.rs");
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].file_path, "kept.rs");
    }

    #[test]
    fn test_blank_input() {
        assert!(parse_numstat_output("").is_empty());
        assert!(parse_numstat_output("   \n\t\n").is_empty());
    }

    #[test]
    fn test_rename_paths_resolve_to_target() {
        let hunks = parse_numstat_output(
            "1\t1\tsrc/{old.rs => new.rs}\n0\t0\told_name.txt => new_name.txt\n2\t0\tsrc/{ => nested}/mod.rs",
        );
        let paths: Vec<&str> = hunks.iter().map(|h| h.file_path.as_str()).collect();
        assert_eq!(paths, vec!["src/new.rs", "new_name.txt", "src/nested/mod.rs"]);
    }

    #[test]
    fn test_path_with_spaces_kept_whole() {
        let hunks = parse_numstat_output("4\t0\tdocs/my notes.md");
        assert_eq!(hunks[0].file_path, "docs/my notes.md");
    }
}
