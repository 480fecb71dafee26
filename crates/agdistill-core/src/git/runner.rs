use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::{Error, Result};

/// Captured result of one git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Process-spawning seam for git.
///
/// A non-zero exit is reported through `GitOutput::success`; `Err` is
/// reserved for the process not starting.
pub trait GitRunner {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput>;
}

/// Runs the git binary found on PATH (or a configured one)
#[derive(Debug, Clone)]
pub struct SystemGit {
    binary: String,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl SystemGit {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        debug!(dir = %dir.display(), args = ?args, "running git");

        let output = Command::new(&self.binary)
            // Keep non-ASCII paths unquoted in numstat output
            .args(["-c", "core.quotepath=false"])
            .args(args)
            .current_dir(dir)
            .env("GIT_OPTIONAL_LOCKS", "0")
            .output()
            .map_err(|source| Error::GitSpawn {
                args: args.join(" "),
                source,
            })?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
