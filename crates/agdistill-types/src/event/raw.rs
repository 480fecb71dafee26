use serde::{Deserialize, Serialize};
use serde_json::Value;

// NOTE: Input records
//
// Raw events are appended by lifecycle hooks while the agent runs. By the time
// they reach this crate the session has terminated and the sequence is finite.
// `data` is kept untyped here; `HookEvent::from_raw` is the single place where
// it is validated into a closed union.

/// One hook record as captured on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Epoch milliseconds
    pub t: i64,

    /// Lifecycle event name (e.g. "PreToolUse")
    pub event: String,

    /// Session id this record belongs to
    #[serde(default)]
    pub sid: String,

    /// Free-form payload, shape depends on `event`
    #[serde(default)]
    pub data: Value,

    /// Session-start metadata (cwd, model, ...), only present on some records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

/// Extracted reasoning block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningNote {
    pub t: i64,
    pub thinking: String,
    #[serde(default)]
    pub intent: ThinkingIntent,
}

/// Coarse classification of what a reasoning block is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThinkingIntent {
    Planning,
    Debugging,
    Research,
    Deciding,
    #[default]
    #[serde(other)]
    General,
}

/// A message from the user side of the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub t: i64,
    pub content: String,
    #[serde(default)]
    pub is_tool_result: bool,
    #[serde(default)]
    pub message_type: MessageType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Prompt,
    ToolResult,
    Command,
    System,
    #[default]
    #[serde(other)]
    Other,
}
