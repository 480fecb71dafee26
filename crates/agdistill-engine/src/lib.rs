// Engine module - pure analysis over a terminated session
// Every entry point here is a synchronous transformation of in-memory inputs

pub mod backtrack;
pub mod duration;
pub mod summary;
pub mod timeline;

pub use backtrack::{
    analyze_backtracks, render_backtrack_summary, render_incident_details, BacktrackOptions,
    BacktrackSummary, CostliestIncident, HotFile, Severity, TypeCount,
};
pub use duration::compute_effective_duration;
pub use summary::{DistillOptions, DistilledSession, ShareBasis};
pub use timeline::{
    cap_timeline, extract_timeline, resolve_agent_name, NameFallback, TimelineInput,
    TimelineOptions, MAX_TIMELINE_ENTRIES, THINKING_PREVIEW_CHARS,
};

// Façade API - Stable public interface for reporting layers

/// Run timeline, duration and backtrack analysis over one session
pub fn distill_session(input: &TimelineInput<'_>, options: &DistillOptions) -> DistilledSession {
    summary::distill(input, options)
}
