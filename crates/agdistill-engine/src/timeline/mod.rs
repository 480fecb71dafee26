mod agent_name;
mod capping;

pub use agent_name::{resolve_agent_name, NameFallback};
pub use capping::cap_timeline;

use agdistill_types::{
    phase_index_at, truncate_chars, BacktrackIncident, EntryType, HookEvent, HookPayload,
    LinkEvent, MessageType, Phase, RawEvent, ReasoningNote, TaskAction, TaskLink, TimelineEntry,
    UserMessage,
};
use std::collections::HashMap;
use tracing::debug;

pub const MAX_TIMELINE_ENTRIES: usize = 500;
pub const THINKING_PREVIEW_CHARS: usize = 200;

/// Borrowed sources merged into one timeline
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineInput<'a> {
    pub events: &'a [RawEvent],
    pub reasoning: &'a [ReasoningNote],
    pub user_messages: &'a [UserMessage],
    pub backtracks: &'a [BacktrackIncident],
    pub phases: &'a [Phase],
    pub task_links: Option<&'a [LinkEvent]>,
    pub agent_names: Option<&'a HashMap<String, String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineOptions {
    pub max_entries: usize,
    pub thinking_preview_chars: usize,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            max_entries: MAX_TIMELINE_ENTRIES,
            thinking_preview_chars: THINKING_PREVIEW_CHARS,
        }
    }
}

/// Merge every source into a chronologically ordered, capped timeline.
///
/// Entries with equal timestamps keep source order: phases, raw events,
/// reasoning notes, user prompts, backtracks, task links.
pub fn extract_timeline(input: &TimelineInput<'_>, options: &TimelineOptions) -> Vec<TimelineEntry> {
    let mut entries = Vec::new();

    for (index, phase) in input.phases.iter().enumerate() {
        let mut entry =
            TimelineEntry::new(phase.start_t, EntryType::PhaseBoundary).with_preview(&phase.name);
        entry.phase_index = Some(index);
        entries.push(entry);
    }

    for raw in input.events {
        match HookEvent::from_raw(raw) {
            Ok(event) => entries.extend(map_hook_event(&event, input.agent_names)),
            Err(err) => debug!(t = raw.t, event = %raw.event, "skipping event: {}", err),
        }
    }

    entries.extend(input.reasoning.iter().map(|note| {
        TimelineEntry::new(note.t, EntryType::Thinking)
            .with_preview(truncate_chars(&note.thinking, options.thinking_preview_chars))
    }));

    entries.extend(
        input
            .user_messages
            .iter()
            .filter(|msg| msg.message_type == MessageType::Prompt)
            .map(|msg| TimelineEntry::new(msg.t, EntryType::UserPrompt).with_preview(&msg.content)),
    );

    entries.extend(input.backtracks.iter().map(map_backtrack));

    if let Some(links) = input.task_links {
        entries.extend(
            links
                .iter()
                .filter_map(|link| map_link_event(link, input.agent_names)),
        );
    }

    for entry in entries
        .iter_mut()
        .filter(|e| e.kind != EntryType::PhaseBoundary)
    {
        entry.phase_index = phase_index_at(input.phases, entry.t);
    }

    // Stable: equal timestamps keep insertion order
    entries.sort_by_key(|e| e.t);

    cap_timeline(entries, options.max_entries)
}

fn map_hook_event(
    event: &HookEvent,
    names: Option<&HashMap<String, String>>,
) -> Option<TimelineEntry> {
    let entry = match &event.payload {
        HookPayload::PreToolUse(tool) => {
            let mut entry = TimelineEntry::new(event.t, EntryType::ToolCall);
            entry.tool_name = Some(tool.tool_name.clone());
            entry.tool_use_id = tool.tool_use_id.clone();
            entry
        }
        HookPayload::PostToolUseFailure(failure) => {
            let mut entry = TimelineEntry::new(event.t, EntryType::Failure);
            entry.tool_name = Some(failure.tool_name.clone());
            entry.tool_use_id = failure.tool_use_id.clone();
            entry.content_preview = failure.error.clone();
            entry
        }
        HookPayload::TeammateIdle(idle) => {
            let name = resolve_agent_name(
                idle.agent_name.as_deref(),
                idle.agent_id.as_deref(),
                None,
                NameFallback::RawId,
            );
            let mut entry = TimelineEntry::new(event.t, EntryType::TeammateIdle)
                .with_preview(format!("{} idle", name.as_deref().unwrap_or("unknown")));
            entry.agent_id = idle.agent_id.clone();
            entry.agent_name = name;
            entry
        }
        HookPayload::TaskCompleted(task) => {
            let mut entry = TimelineEntry::new(event.t, EntryType::TaskComplete).with_preview(
                format!(
                    "Task completed: {}",
                    task.task_subject.as_deref().unwrap_or("unknown")
                ),
            );
            entry.task_id = task.task_id.clone();
            entry.task_subject = task.task_subject.clone();
            entry
        }
        HookPayload::SubagentStart(start) => {
            let name = resolve_agent_name(
                start.agent_name.as_deref(),
                start.agent_id.as_deref(),
                names,
                NameFallback::TruncatedId,
            );
            let mut entry =
                TimelineEntry::new(event.t, EntryType::AgentSpawn).with_preview(format!(
                    "Spawned {} ({})",
                    name.as_deref().unwrap_or("unknown"),
                    start.agent_type.as_deref().unwrap_or("unknown")
                ));
            entry.agent_id = start.agent_id.clone();
            entry.agent_name = name;
            entry
        }
        HookPayload::SubagentStop(stop) => {
            let name =
                resolve_agent_name(None, stop.agent_id.as_deref(), names, NameFallback::Omit);
            let shown = name
                .as_deref()
                .or(stop.agent_id.as_deref())
                .unwrap_or("unknown");
            let mut entry = TimelineEntry::new(event.t, EntryType::AgentStop)
                .with_preview(format!("Stopped {}", shown));
            entry.agent_id = stop.agent_id.clone();
            entry.agent_name = name;
            entry
        }
        HookPayload::PostToolUse(_) | HookPayload::Lifecycle(_) => return None,
    };
    Some(entry)
}

fn map_backtrack(incident: &BacktrackIncident) -> TimelineEntry {
    let mut entry = TimelineEntry::new(incident.start_t, EntryType::Backtrack).with_preview(
        format!(
            "{}: {} ({} attempts)",
            incident.kind.label(),
            incident.tool_name,
            incident.attempts
        ),
    );
    entry.tool_name = Some(incident.tool_name.clone());
    entry
}

fn map_link_event(
    link: &LinkEvent,
    names: Option<&HashMap<String, String>>,
) -> Option<TimelineEntry> {
    let LinkEvent::Task(task) = link else {
        return None;
    };

    match task.action {
        TaskAction::Create => {
            let mut entry = task_entry(task, EntryType::TaskCreate)
                .with_preview(format!("Task created: {}", task.label()));
            entry.agent_name =
                resolve_agent_name(None, task.creator.as_deref(), names, NameFallback::RawId);
            Some(entry)
        }
        TaskAction::Assign => {
            let mut entry = task_entry(task, EntryType::TaskAssign).with_preview(format!(
                "Task assigned to {}: {}",
                task.owner.as_deref().unwrap_or("unknown"),
                task.label()
            ));
            entry.agent_name = task.owner.clone();
            Some(entry)
        }
        TaskAction::Update | TaskAction::Other => None,
    }
}

fn task_entry(task: &TaskLink, kind: EntryType) -> TimelineEntry {
    let mut entry = TimelineEntry::new(task.t, kind);
    entry.task_id = Some(task.task_id.clone());
    entry.task_subject = task.subject.clone();
    entry
}
