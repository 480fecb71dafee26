pub mod config;
pub mod error;
pub mod git;
pub mod path;

pub use config::DistillConfig;
pub use error::{Error, Result};
pub use git::{
    extract_git_diff, parse_numstat_output, GitDiffExtractor, GitOutput, GitRunner, SystemGit,
};
pub use path::*;
