use serde::{Deserialize, Serialize};

use crate::title_case;

/// Pattern a backtrack detector recognised.
///
/// Detectors may emit tags this crate does not know yet; those are kept
/// verbatim in `Other` instead of failing the whole incident list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BacktrackType {
    /// Same tool re-invoked after it failed
    FailureRetry,
    /// Same file edited repeatedly in a short window
    IterationStruggle,
    /// Alternating edit/run cycles against a failing command
    DebuggingLoop,
    /// Any other detector tag, snake_case as received
    Other(String),
}

impl BacktrackType {
    pub fn as_str(&self) -> &str {
        match self {
            BacktrackType::FailureRetry => "failure_retry",
            BacktrackType::IterationStruggle => "iteration_struggle",
            BacktrackType::DebuggingLoop => "debugging_loop",
            BacktrackType::Other(tag) => tag,
        }
    }

    /// Human label, e.g. "Failure Retry"
    pub fn label(&self) -> String {
        title_case(self.as_str())
    }
}

impl From<String> for BacktrackType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "failure_retry" => BacktrackType::FailureRetry,
            "iteration_struggle" => BacktrackType::IterationStruggle,
            "debugging_loop" => BacktrackType::DebuggingLoop,
            _ => BacktrackType::Other(tag),
        }
    }
}

impl From<BacktrackType> for String {
    fn from(kind: BacktrackType) -> Self {
        match kind {
            BacktrackType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktrackIncident {
    #[serde(rename = "type")]
    pub kind: BacktrackType,
    pub tool_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub attempts: u32,
    pub start_t: i64,
    pub end_t: i64,
    #[serde(default)]
    pub tool_use_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl BacktrackIncident {
    /// Time spent inside the incident; inverted windows count as zero
    pub fn duration_ms(&self) -> i64 {
        (self.end_t - self.start_t).max(0)
    }
}
