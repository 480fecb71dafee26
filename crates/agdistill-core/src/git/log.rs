use agdistill_types::GitCommit;
use chrono::DateTime;
use tracing::debug;

/// hash, parents, committer date (strict ISO-8601), author, subject;
/// separated by the ASCII unit separator
pub const LOG_FORMAT: &str = "--format=%H%x1f%P%x1f%cI%x1f%an%x1f%s";

const FIELD_SEP: char = '\u{1f}';

/// Parse `git log` output produced with [`LOG_FORMAT`]
pub fn parse_log_output(text: &str) -> Vec<GitCommit> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let commit = parse_log_line(line);
            if commit.is_none() {
                debug!(line, "unparseable git log line");
            }
            commit
        })
        .collect()
}

fn parse_log_line(line: &str) -> Option<GitCommit> {
    let mut fields = line.splitn(5, FIELD_SEP);
    let hash = fields.next()?.trim();
    let parents = fields.next()?;
    let date = fields.next()?;
    let author = fields.next()?;
    let subject = fields.next().unwrap_or_default();

    if hash.is_empty() {
        return None;
    }

    let timestamp = DateTime::parse_from_rfc3339(date.trim())
        .ok()?
        .timestamp_millis();

    Some(GitCommit {
        hash: hash.to_string(),
        timestamp,
        author: author.to_string(),
        subject: subject.to_string(),
        parents: parents.split_whitespace().map(str::to_string).collect(),
    })
}
