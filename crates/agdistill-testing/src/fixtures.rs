//! Fixtures for session data generation.
//!
//! Provides utilities to:
//! - Build raw hook event streams with a moving clock
//! - Construct phases, backtrack incidents and user messages in one line

use agdistill_types::{
    BacktrackIncident, BacktrackType, MessageType, Phase, RawEvent, ReasoningNote,
    ThinkingIntent, UserMessage,
};
use serde_json::{json, Value};

/// Declarative builder for a session's raw event stream.
///
/// # Example
/// ```
/// use agdistill_testing::SessionBuilder;
///
/// let events = SessionBuilder::new("s1")
///     .at(1_000)
///     .session_start()
///     .advance(500)
///     .tool_call("Bash", "tu_1")
///     .build();
///
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[1].t, 1_500);
/// ```
pub struct SessionBuilder {
    sid: String,
    clock: i64,
    events: Vec<RawEvent>,
}

impl SessionBuilder {
    pub fn new(sid: &str) -> Self {
        Self {
            sid: sid.to_string(),
            clock: 0,
            events: Vec::new(),
        }
    }

    /// Set the clock to an absolute epoch-ms value
    pub fn at(mut self, t: i64) -> Self {
        self.clock = t;
        self
    }

    /// Move the clock forward
    pub fn advance(mut self, ms: i64) -> Self {
        self.clock += ms;
        self
    }

    /// Append an arbitrary event at the current clock
    pub fn event(mut self, event: &str, data: Value) -> Self {
        self.events.push(RawEvent {
            t: self.clock,
            event: event.to_string(),
            sid: self.sid.clone(),
            data,
            context: None,
        });
        self
    }

    pub fn session_start(self) -> Self {
        self.event("SessionStart", json!({"source": "startup"}))
    }

    pub fn session_end(self) -> Self {
        self.event("SessionEnd", json!({"reason": "exit"}))
    }

    pub fn tool_call(self, tool_name: &str, tool_use_id: &str) -> Self {
        self.event(
            "PreToolUse",
            json!({"tool_name": tool_name, "tool_use_id": tool_use_id, "tool_input": {}}),
        )
    }

    /// PreToolUse for a file-writing tool (`Edit`, `Write`, ...)
    pub fn file_tool(self, tool_name: &str, tool_use_id: &str, file_path: &str) -> Self {
        self.event(
            "PreToolUse",
            json!({
                "tool_name": tool_name,
                "tool_use_id": tool_use_id,
                "tool_input": {"file_path": file_path}
            }),
        )
    }

    pub fn edit(self, tool_use_id: &str, file_path: &str) -> Self {
        self.file_tool("Edit", tool_use_id, file_path)
    }

    pub fn failure(self, tool_name: &str, tool_use_id: &str, error: &str) -> Self {
        self.event(
            "PostToolUseFailure",
            json!({"tool_name": tool_name, "tool_use_id": tool_use_id, "error": error}),
        )
    }

    pub fn teammate_idle(self, agent_id: &str, agent_name: Option<&str>) -> Self {
        self.event(
            "TeammateIdle",
            json!({"agent_id": agent_id, "agent_name": agent_name}),
        )
    }

    pub fn task_completed(self, task_id: &str, subject: Option<&str>) -> Self {
        self.event(
            "TaskCompleted",
            json!({"task_id": task_id, "task_subject": subject}),
        )
    }

    pub fn subagent_start(self, agent_id: &str, agent_name: Option<&str>, agent_type: &str) -> Self {
        self.event(
            "SubagentStart",
            json!({"agent_id": agent_id, "agent_name": agent_name, "agent_type": agent_type}),
        )
    }

    pub fn subagent_stop(self, agent_id: &str) -> Self {
        self.event("SubagentStop", json!({"agent_id": agent_id}))
    }

    /// Current clock value
    pub fn now(&self) -> i64 {
        self.clock
    }

    pub fn build(self) -> Vec<RawEvent> {
        self.events
    }
}

pub fn phase(name: &str, start_t: i64, end_t: i64) -> Phase {
    Phase {
        name: name.to_string(),
        start_t,
        end_t,
        tool_types: Vec::new(),
        description: format!("{} phase", name),
    }
}

pub fn incident(
    kind: BacktrackType,
    tool_name: &str,
    file_path: Option<&str>,
    attempts: u32,
    start_t: i64,
    end_t: i64,
) -> BacktrackIncident {
    BacktrackIncident {
        kind,
        tool_name: tool_name.to_string(),
        file_path: file_path.map(str::to_string),
        attempts,
        start_t,
        end_t,
        tool_use_ids: Vec::new(),
        error_message: None,
        command: None,
    }
}

pub fn prompt(t: i64, content: &str) -> UserMessage {
    UserMessage {
        t,
        content: content.to_string(),
        is_tool_result: false,
        message_type: MessageType::Prompt,
    }
}

pub fn thinking(t: i64, text: &str) -> ReasoningNote {
    ReasoningNote {
        t,
        thinking: text.to_string(),
        intent: ThinkingIntent::General,
    }
}
