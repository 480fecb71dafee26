//! Throwaway git repositories for diff-correlation tests.
//!
//! Commits can be back-dated so they land inside (or outside) a synthetic
//! session window.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Whether a usable `git` binary is on PATH
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Isolated git repository in a temp directory.
///
/// # Example
/// ```no_run
/// use agdistill_testing::TestRepo;
///
/// let repo = TestRepo::init().unwrap();
/// repo.write_file("src/lib.rs", "pub fn a() {}\n").unwrap();
/// repo.commit_all_at("add lib", 1_700_000_000).unwrap();
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl TestRepo {
    /// Create an empty repository (no commits yet)
    pub fn init() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let repo = Self { temp_dir };
        repo.git(&["init", "-q"])?;
        Ok(repo)
    }

    /// A plain directory that is not under version control
    pub fn plain_dir() -> Result<TempDir> {
        TempDir::new().context("Failed to create temp dir")
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a repository-relative file
    pub fn abs(&self, rel: &str) -> PathBuf {
        self.path().join(rel)
    }

    pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
        let path = self.abs(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", rel))?;
        Ok(())
    }

    pub fn remove_file(&self, rel: &str) -> Result<()> {
        fs::remove_file(self.abs(rel)).with_context(|| format!("Failed to remove {}", rel))?;
        Ok(())
    }

    /// Stage everything and commit with author and committer date `epoch_secs`
    pub fn commit_all_at(&self, message: &str, epoch_secs: i64) -> Result<String> {
        self.git(&["add", "-A"])?;

        let date = format!("@{} +0000", epoch_secs);
        let output = self
            .command(&["-c", "commit.gpgsign=false", "commit", "-q", "-m", message])
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .output()
            .context("Failed to spawn git commit")?;
        if !output.status.success() {
            bail!(
                "git commit failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let head = self.git(&["rev-parse", "HEAD"])?;
        Ok(head.trim().to_string())
    }

    /// Run git in the repository and return stdout
    pub fn git(&self, args: &[&str]) -> Result<String> {
        let output = self
            .command(args)
            .output()
            .with_context(|| format!("Failed to spawn git {}", args.join(" ")))?;
        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args)
            .current_dir(self.path())
            .env("GIT_AUTHOR_NAME", "Test Author")
            .env("GIT_AUTHOR_EMAIL", "author@example.com")
            .env("GIT_COMMITTER_NAME", "Test Author")
            .env("GIT_COMMITTER_EMAIL", "author@example.com")
            .env("GIT_CONFIG_NOSYSTEM", "1");
        cmd
    }
}
