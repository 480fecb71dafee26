use serde::{Deserialize, Serialize};

/// A named, time-bounded stage of the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub start_t: i64,
    pub end_t: i64,
    #[serde(default)]
    pub tool_types: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Phase {
    /// Inclusive on both ends
    pub fn contains(&self, t: i64) -> bool {
        self.start_t <= t && t <= self.end_t
    }
}

/// Index of the first phase whose window contains `t`
pub fn phase_index_at(phases: &[Phase], t: i64) -> Option<usize> {
    phases.iter().position(|phase| phase.contains(t))
}
