use serde::{Deserialize, Serialize};

/// Gaps strictly longer than this are idle time
pub const IDLE_THRESHOLD_MS: i64 = 300_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationResult {
    pub wall_duration_ms: i64,
    pub idle_gaps_ms: i64,
    pub effective_duration_ms: i64,
    /// Last timestamp before any trailing idle tail
    pub effective_end_t: i64,
}

impl DurationResult {
    /// Share of wall time spent idle, 0.0 for empty sessions
    pub fn idle_ratio(&self) -> f64 {
        if self.wall_duration_ms <= 0 {
            0.0
        } else {
            self.idle_gaps_ms as f64 / self.wall_duration_ms as f64
        }
    }
}
