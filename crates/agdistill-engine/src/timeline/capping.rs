use agdistill_types::TimelineEntry;
use tracing::debug;

/// Bound a chronologically sorted timeline to `max_entries`.
///
/// Structural entries are always kept. The remaining budget is spent on
/// high-volume entries picked at an even stride across their combined
/// subsequence, so the first and last of them always survive. When
/// structural entries alone reach the cap they are all kept and nothing else
/// is.
pub fn cap_timeline(entries: Vec<TimelineEntry>, max_entries: usize) -> Vec<TimelineEntry> {
    if entries.len() <= max_entries {
        return entries;
    }

    let structural = entries.iter().filter(|e| e.kind.is_structural()).count();
    let high_volume = entries.len() - structural;
    let budget = max_entries.saturating_sub(structural);

    let mut keep = vec![false; high_volume];
    for idx in stride_indices(high_volume, budget) {
        keep[idx] = true;
    }

    debug!(
        total = entries.len(),
        structural,
        high_volume,
        budget,
        "capping timeline"
    );

    let mut ordinal = 0;
    let mut capped: Vec<TimelineEntry> = entries
        .into_iter()
        .filter(|entry| {
            if entry.kind.is_structural() {
                return true;
            }
            let kept = keep[ordinal];
            ordinal += 1;
            kept
        })
        .collect();

    capped.sort_by_key(|e| e.t);
    capped
}

/// `budget` distinct indices spread evenly over `0..n`, endpoints included
fn stride_indices(n: usize, budget: usize) -> Vec<usize> {
    match budget {
        0 => Vec::new(),
        b if b >= n => (0..n).collect(),
        1 => vec![0],
        b => (0..b).map(|i| i * (n - 1) / (b - 1)).collect(),
    }
}
