use std::fmt::Write;

use agdistill_types::BacktrackIncident;

use super::{BacktrackSummary, Severity};

/// Markdown section summarising backtracks for a session report
pub fn render_backtrack_summary(summary: &BacktrackSummary) -> String {
    let mut out = String::from("## Backtracks\n\n");

    if summary.severity == Severity::None {
        out.push_str("**Severity:** none\n\nNo backtracks detected.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "**Severity:** {} ({} incidents)\n",
        summary.severity.as_str(),
        summary.total_incidents
    );

    out.push_str("**By type:**\n");
    for count in &summary.by_type {
        let _ = writeln!(out, "- {}: {}", count.label, count.count);
    }

    if !summary.hot_files.is_empty() {
        out.push_str("\n**Hot files:**\n");
        for file in &summary.hot_files {
            let _ = writeln!(out, "- `{}` ({})", file.file_path, file.annotation());
        }
    }

    if let Some(worst) = &summary.costliest {
        let _ = write!(
            out,
            "\n**Costliest:** {} on {}, {} attempts",
            worst.kind.label(),
            worst.tool_name,
            worst.attempts
        );
        if let Some(error) = &worst.error_message {
            let _ = write!(out, " ({})", error);
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "\n**Time in backtracks:** {} ({}% of session)",
        format_duration_ms(summary.time_in_backtracks_ms),
        summary.time_share_pct
    );

    out
}

/// One block per incident, numbered from 1
pub fn render_incident_details(incidents: &[BacktrackIncident]) -> String {
    let mut blocks = Vec::with_capacity(incidents.len());

    for (i, incident) in incidents.iter().enumerate() {
        let mut block = String::new();
        let _ = writeln!(block, "### Backtrack {}", i + 1);
        let _ = writeln!(block, "- **Type:** {}", incident.kind.label());
        let _ = writeln!(block, "- **Tool:** {}", incident.tool_name);
        let _ = writeln!(block, "- **Attempts:** {}", incident.attempts);
        if let Some(path) = &incident.file_path {
            let _ = writeln!(block, "- **File:** `{}`", path);
        }
        if let Some(error) = &incident.error_message {
            let _ = writeln!(block, "- **Error:** {}", error);
        }
        if let Some(command) = &incident.command {
            let _ = writeln!(block, "- **Command:** `{}`", command);
        }
        blocks.push(block);
    }

    blocks.join("\n")
}

fn format_duration_ms(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    format!("{}m {:02}s", total_seconds / 60, total_seconds % 60)
}
