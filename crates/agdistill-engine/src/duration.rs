use agdistill_types::{DurationResult, IDLE_THRESHOLD_MS};

/// Wall, idle and effective duration of a session from its activity timestamps.
///
/// Input order does not matter. A gap is idle only when strictly longer than
/// the threshold (default `IDLE_THRESHOLD_MS`). `effective_end_t` backs off
/// over trailing idle gaps only; interior gaps are followed by activity and
/// leave it alone.
pub fn compute_effective_duration(
    timestamps: &[i64],
    idle_threshold_ms: Option<i64>,
) -> DurationResult {
    let threshold = idle_threshold_ms.unwrap_or(IDLE_THRESHOLD_MS);

    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable();

    let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
        return DurationResult::default();
    };

    let is_idle = |delta: i64| delta > threshold;

    let idle_gaps_ms: i64 = sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&delta| is_idle(delta))
        .sum();

    let mut end_idx = sorted.len() - 1;
    while end_idx > 0 && is_idle(sorted[end_idx] - sorted[end_idx - 1]) {
        end_idx -= 1;
    }

    let wall_duration_ms = last - first;

    DurationResult {
        wall_duration_ms,
        idle_gaps_ms,
        effective_duration_ms: wall_duration_ms - idle_gaps_ms,
        effective_end_t: sorted[end_idx],
    }
}
