mod render;

pub use render::{render_backtrack_summary, render_incident_details};

use agdistill_types::{BacktrackIncident, BacktrackType};
use serde::{Deserialize, Serialize};

/// Overall severity, a step function of the incident count:
/// 0 → none, 1–2 → LOW, 3–4 → MEDIUM, 5+ → HIGH
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl Severity {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Severity::None,
            1..=2 => Severity::Low,
            3..=4 => Severity::Medium,
            _ => Severity::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackOptions {
    /// A file is hot once this many incidents touch it
    pub hot_file_min_occurrences: usize,
}

impl Default for BacktrackOptions {
    fn default() -> Self {
        Self {
            hot_file_min_occurrences: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: BacktrackType,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotFile {
    pub file_path: String,
    pub count: usize,
}

impl HotFile {
    /// "2x", "3x", ...
    pub fn annotation(&self) -> String {
        format!("{}x", self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostliestIncident {
    /// Position in the input slice
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: BacktrackType,
    pub tool_name: String,
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktrackSummary {
    pub severity: Severity,
    pub total_incidents: usize,
    /// First-seen order
    pub by_type: Vec<TypeCount>,
    /// Highest count first, ties in first-seen order
    pub hot_files: Vec<HotFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costliest: Option<CostliestIncident>,
    pub time_in_backtracks_ms: i64,
    /// Share of the session spent in backtracks, one decimal place ("25.0")
    pub time_share_pct: String,
}

/// Aggregate detected incidents into a severity/hot-file/cost summary
pub fn analyze_backtracks(
    incidents: &[BacktrackIncident],
    duration_ms: i64,
    options: &BacktrackOptions,
) -> BacktrackSummary {
    let time_in_backtracks_ms: i64 = incidents.iter().map(|i| i.duration_ms()).sum();

    BacktrackSummary {
        severity: Severity::from_count(incidents.len()),
        total_incidents: incidents.len(),
        by_type: count_by_type(incidents),
        hot_files: hot_files(incidents, options.hot_file_min_occurrences),
        costliest: costliest(incidents),
        time_in_backtracks_ms,
        time_share_pct: format_share(time_in_backtracks_ms, duration_ms),
    }
}

fn count_by_type(incidents: &[BacktrackIncident]) -> Vec<TypeCount> {
    let mut counts: Vec<TypeCount> = Vec::new();
    for incident in incidents {
        match counts.iter_mut().find(|c| c.kind == incident.kind) {
            Some(existing) => existing.count += 1,
            None => counts.push(TypeCount {
                kind: incident.kind.clone(),
                label: incident.kind.label(),
                count: 1,
            }),
        }
    }
    counts
}

fn hot_files(incidents: &[BacktrackIncident], min_occurrences: usize) -> Vec<HotFile> {
    let mut files: Vec<HotFile> = Vec::new();
    for path in incidents.iter().filter_map(|i| i.file_path.as_deref()) {
        match files.iter_mut().find(|f| f.file_path == path) {
            Some(existing) => existing.count += 1,
            None => files.push(HotFile {
                file_path: path.to_string(),
                count: 1,
            }),
        }
    }

    files.retain(|f| f.count >= min_occurrences);
    files.sort_by_key(|f| std::cmp::Reverse(f.count));
    files
}

fn costliest(incidents: &[BacktrackIncident]) -> Option<CostliestIncident> {
    let mut best: Option<(usize, &BacktrackIncident)> = None;
    for (index, incident) in incidents.iter().enumerate() {
        // Strictly greater: the first of equal maxima wins
        if best.is_none_or(|(_, current)| incident.attempts > current.attempts) {
            best = Some((index, incident));
        }
    }

    best.map(|(index, incident)| CostliestIncident {
        index,
        kind: incident.kind.clone(),
        tool_name: incident.tool_name.clone(),
        attempts: incident.attempts,
        error_message: incident.error_message.clone(),
    })
}

fn format_share(part_ms: i64, total_ms: i64) -> String {
    if total_ms <= 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", part_ms as f64 / total_ms as f64 * 100.0)
}
