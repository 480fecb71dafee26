use agdistill_engine::{BacktrackOptions, DistillOptions, ShareBasis, TimelineOptions};
use agdistill_types::IDLE_THRESHOLD_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::git::{GitDiffExtractor, SystemGit, DEFAULT_EDIT_TOOLS};
use crate::path::expand_tilde;
use crate::{Error, Result};

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. AGDISTILL_CONFIG environment variable (with tilde expansion)
/// 3. System config directory
/// 4. ~/.agdistill/config.toml (fallback for systems without one)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("AGDISTILL_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("agdistill").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".agdistill").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or system config directory found"
            .to_string(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub max_entries: usize,
    pub thinking_preview_chars: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        let options = TimelineOptions::default();
        Self {
            max_entries: options.max_entries,
            thinking_preview_chars: options.thinking_preview_chars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationConfig {
    pub idle_threshold_ms: i64,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            idle_threshold_ms: IDLE_THRESHOLD_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktrackConfig {
    pub hot_file_min_occurrences: usize,
    /// `wall` or `effective` session duration as the time-share denominator
    pub share_basis: ShareBasis,
}

impl Default for BacktrackConfig {
    fn default() -> Self {
        Self {
            hot_file_min_occurrences: BacktrackOptions::default().hot_file_min_occurrences,
            share_basis: ShareBasis::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// git executable, looked up on PATH unless absolute
    pub binary: String,
    /// Tools whose `tool_input.file_path` can explain a diff
    pub edit_tools: Vec<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: "git".to_string(),
            edit_tools: DEFAULT_EDIT_TOOLS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DistillConfig {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub duration: DurationConfig,
    #[serde(default)]
    pub backtrack: BacktrackConfig,
    #[serde(default)]
    pub git: GitConfig,
}

impl DistillConfig {
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path(None)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: DistillConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.timeline.max_entries == 0 {
            return Err(Error::Config("timeline.max_entries must be at least 1".to_string()));
        }
        if self.duration.idle_threshold_ms < 0 {
            return Err(Error::Config(
                "duration.idle_threshold_ms must not be negative".to_string(),
            ));
        }
        if self.git.binary.trim().is_empty() {
            return Err(Error::Config("git.binary must not be empty".to_string()));
        }
        Ok(())
    }

    /// Options for the pure analyzers
    pub fn distill_options(&self) -> DistillOptions {
        DistillOptions {
            timeline: TimelineOptions {
                max_entries: self.timeline.max_entries,
                thinking_preview_chars: self.timeline.thinking_preview_chars,
            },
            idle_threshold_ms: self.duration.idle_threshold_ms,
            backtrack: BacktrackOptions {
                hot_file_min_occurrences: self.backtrack.hot_file_min_occurrences,
            },
            share_basis: self.backtrack.share_basis,
        }
    }

    /// Diff extractor wired to the configured git binary and edit tools
    pub fn git_extractor(&self) -> GitDiffExtractor<SystemGit> {
        GitDiffExtractor::new(SystemGit::new(self.git.binary.clone()))
            .with_edit_tools(self.git.edit_tools.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default_matches_engine_defaults() {
        let config = DistillConfig::default();
        assert_eq!(config.distill_options(), DistillOptions::default());
        assert_eq!(config.git.edit_tools, vec!["Edit", "Write", "MultiEdit"]);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = DistillConfig::default();
        config.duration.idle_threshold_ms = 120_000;
        config.git.edit_tools.push("NotebookEdit".to_string());

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = DistillConfig::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[timeline]\nmax_entries = 50\n")?;

        let config = DistillConfig::load_from(&config_path)?;
        assert_eq!(config.timeline.max_entries, 50);
        assert_eq!(config.timeline.thinking_preview_chars, 200);
        assert_eq!(config.duration.idle_threshold_ms, IDLE_THRESHOLD_MS);
        assert_eq!(config.backtrack.share_basis, ShareBasis::Wall);

        Ok(())
    }

    #[test]
    fn test_share_basis_from_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[backtrack]\nshare_basis = \"effective\"\n")?;

        let config = DistillConfig::load_from(&config_path)?;
        assert_eq!(config.distill_options().share_basis, ShareBasis::Effective);
        assert_eq!(config.backtrack.hot_file_min_occurrences, 2);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = DistillConfig::load_from(&config_path)?;
        assert_eq!(config, DistillConfig::default());

        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[timeline]\nmax_entries = 0\n")?;

        let err = DistillConfig::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        std::fs::write(&config_path, "[duration]\nidle_threshold_ms = \"soon\"\n")?;
        assert!(matches!(
            DistillConfig::load_from(&config_path),
            Err(Error::Config(_))
        ));

        Ok(())
    }

    #[test]
    fn test_explicit_path_has_priority() -> Result<()> {
        let path = resolve_config_path(Some("/explicit/config.toml"))?;
        assert_eq!(path, PathBuf::from("/explicit/config.toml"));
        Ok(())
    }
}
