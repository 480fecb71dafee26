use agdistill_types::{DurationResult, IDLE_THRESHOLD_MS, TimelineEntry};
use serde::{Deserialize, Serialize};

use crate::backtrack::{analyze_backtracks, BacktrackOptions, BacktrackSummary};
use crate::duration::compute_effective_duration;
use crate::timeline::{extract_timeline, TimelineInput, TimelineOptions};

/// Which session duration the backtrack time share is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareBasis {
    /// First to last event, idle gaps included
    #[default]
    Wall,
    /// Wall duration minus idle gaps
    Effective,
}

impl ShareBasis {
    pub fn duration_ms(&self, duration: &DurationResult) -> i64 {
        match self {
            ShareBasis::Wall => duration.wall_duration_ms,
            ShareBasis::Effective => duration.effective_duration_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistillOptions {
    pub timeline: TimelineOptions,
    pub idle_threshold_ms: i64,
    pub backtrack: BacktrackOptions,
    pub share_basis: ShareBasis,
}

impl Default for DistillOptions {
    fn default() -> Self {
        Self {
            timeline: TimelineOptions::default(),
            idle_threshold_ms: IDLE_THRESHOLD_MS,
            backtrack: BacktrackOptions::default(),
            share_basis: ShareBasis::default(),
        }
    }
}

/// The pure artifacts of one session, ready for a reporting layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistilledSession {
    pub timeline: Vec<TimelineEntry>,
    pub duration: DurationResult,
    pub backtracks: BacktrackSummary,
}

pub(crate) fn distill(input: &TimelineInput<'_>, options: &DistillOptions) -> DistilledSession {
    let timestamps: Vec<i64> = input.events.iter().map(|e| e.t).collect();
    let duration = compute_effective_duration(&timestamps, Some(options.idle_threshold_ms));

    let backtracks = analyze_backtracks(
        input.backtracks,
        options.share_basis.duration_ms(&duration),
        &options.backtrack,
    );

    DistilledSession {
        timeline: extract_timeline(input, &options.timeline),
        duration,
        backtracks,
    }
}
