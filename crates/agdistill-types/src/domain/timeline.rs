use serde::{Deserialize, Serialize};

/// Closed set of timeline entry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    ToolCall,
    Failure,
    Thinking,
    UserPrompt,
    Backtrack,
    PhaseBoundary,
    TeammateIdle,
    TaskComplete,
    AgentSpawn,
    AgentStop,
    TaskCreate,
    TaskAssign,
}

impl EntryType {
    /// Structural entries mark discrete, low-frequency moments and survive capping
    pub fn is_structural(&self) -> bool {
        !self.is_high_volume()
    }

    /// Routine activity that is sampled when the timeline is over budget
    pub fn is_high_volume(&self) -> bool {
        matches!(
            self,
            EntryType::ToolCall | EntryType::Failure | EntryType::Thinking | EntryType::Backtrack
        )
    }
}

/// One row of the distilled timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Epoch milliseconds
    pub t: i64,

    #[serde(rename = "type")]
    pub kind: EntryType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_use_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,

    /// Index of the phase this entry falls into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_index: Option<usize>,
}

impl TimelineEntry {
    /// Bare entry with every optional field unset
    pub fn new(t: i64, kind: EntryType) -> Self {
        Self {
            t,
            kind,
            tool_name: None,
            tool_use_id: None,
            agent_id: None,
            agent_name: None,
            task_id: None,
            task_subject: None,
            content_preview: None,
            phase_index: None,
        }
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.content_preview = Some(preview.into());
        self
    }
}
