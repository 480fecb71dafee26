use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::raw::RawEvent;
use crate::{Error, Result};

/// Lifecycle event names emitted by the agent's hook system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookEventKind {
    SessionStart,
    SessionEnd,
    UserPromptSubmit,
    PreToolUse,
    PostToolUse,
    PostToolUseFailure,
    PermissionRequest,
    Notification,
    Stop,
    SubagentStart,
    SubagentStop,
    PreCompact,
    TeammateIdle,
    TaskCompleted,
    ConfigChange,
    InstructionsLoaded,
    Setup,
}

impl HookEventKind {
    pub fn all() -> Vec<Self> {
        vec![
            HookEventKind::SessionStart,
            HookEventKind::SessionEnd,
            HookEventKind::UserPromptSubmit,
            HookEventKind::PreToolUse,
            HookEventKind::PostToolUse,
            HookEventKind::PostToolUseFailure,
            HookEventKind::PermissionRequest,
            HookEventKind::Notification,
            HookEventKind::Stop,
            HookEventKind::SubagentStart,
            HookEventKind::SubagentStop,
            HookEventKind::PreCompact,
            HookEventKind::TeammateIdle,
            HookEventKind::TaskCompleted,
            HookEventKind::ConfigChange,
            HookEventKind::InstructionsLoaded,
            HookEventKind::Setup,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HookEventKind::SessionStart => "SessionStart",
            HookEventKind::SessionEnd => "SessionEnd",
            HookEventKind::UserPromptSubmit => "UserPromptSubmit",
            HookEventKind::PreToolUse => "PreToolUse",
            HookEventKind::PostToolUse => "PostToolUse",
            HookEventKind::PostToolUseFailure => "PostToolUseFailure",
            HookEventKind::PermissionRequest => "PermissionRequest",
            HookEventKind::Notification => "Notification",
            HookEventKind::Stop => "Stop",
            HookEventKind::SubagentStart => "SubagentStart",
            HookEventKind::SubagentStop => "SubagentStop",
            HookEventKind::PreCompact => "PreCompact",
            HookEventKind::TeammateIdle => "TeammateIdle",
            HookEventKind::TaskCompleted => "TaskCompleted",
            HookEventKind::ConfigChange => "ConfigChange",
            HookEventKind::InstructionsLoaded => "InstructionsLoaded",
            HookEventKind::Setup => "Setup",
        }
    }
}

impl fmt::Display for HookEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookEventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HookEventKind::all()
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownEvent(s.to_string()))
    }
}

/// PreToolUse / PostToolUse payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    pub tool_name: String,
    #[serde(default)]
    pub tool_use_id: Option<String>,
    #[serde(default)]
    pub tool_input: Value,
}

impl ToolUse {
    /// `tool_input.file_path`, when the tool targets a file
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input.get("file_path").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    pub tool_name: String,
    #[serde(default)]
    pub tool_use_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeammateIdle {
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default, alias = "teammate_name")]
    pub agent_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskCompleted {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default, alias = "subject")]
    pub task_subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubagentStart {
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub agent_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubagentStop {
    #[serde(default)]
    pub agent_id: Option<String>,
}

/// Validated payload, one variant per event kind the analyzers read
#[derive(Debug, Clone, PartialEq)]
pub enum HookPayload {
    PreToolUse(ToolUse),
    PostToolUse(ToolUse),
    PostToolUseFailure(ToolFailure),
    TeammateIdle(TeammateIdle),
    TaskCompleted(TaskCompleted),
    SubagentStart(SubagentStart),
    SubagentStop(SubagentStop),
    /// Kinds whose payload carries nothing the analyzers consume
    Lifecycle(HookEventKind),
}

/// A raw event after validation
#[derive(Debug, Clone, PartialEq)]
pub struct HookEvent {
    pub t: i64,
    pub sid: String,
    pub payload: HookPayload,
}

impl HookEvent {
    /// Validate a raw record into the closed union.
    ///
    /// Unknown event names and payloads missing required fields are errors;
    /// callers that tolerate partial logs skip them.
    pub fn from_raw(raw: &RawEvent) -> Result<Self> {
        let kind: HookEventKind = raw.event.parse()?;
        let payload = match kind {
            HookEventKind::PreToolUse => HookPayload::PreToolUse(decode(kind, &raw.data)?),
            HookEventKind::PostToolUse => HookPayload::PostToolUse(decode(kind, &raw.data)?),
            HookEventKind::PostToolUseFailure => {
                HookPayload::PostToolUseFailure(decode(kind, &raw.data)?)
            }
            HookEventKind::TeammateIdle => HookPayload::TeammateIdle(decode(kind, &raw.data)?),
            HookEventKind::TaskCompleted => HookPayload::TaskCompleted(decode(kind, &raw.data)?),
            HookEventKind::SubagentStart => HookPayload::SubagentStart(decode(kind, &raw.data)?),
            HookEventKind::SubagentStop => HookPayload::SubagentStop(decode(kind, &raw.data)?),
            other => HookPayload::Lifecycle(other),
        };

        Ok(HookEvent {
            t: raw.t,
            sid: raw.sid.clone(),
            payload,
        })
    }

    pub fn kind(&self) -> HookEventKind {
        match &self.payload {
            HookPayload::PreToolUse(_) => HookEventKind::PreToolUse,
            HookPayload::PostToolUse(_) => HookEventKind::PostToolUse,
            HookPayload::PostToolUseFailure(_) => HookEventKind::PostToolUseFailure,
            HookPayload::TeammateIdle(_) => HookEventKind::TeammateIdle,
            HookPayload::TaskCompleted(_) => HookEventKind::TaskCompleted,
            HookPayload::SubagentStart(_) => HookEventKind::SubagentStart,
            HookPayload::SubagentStop(_) => HookEventKind::SubagentStop,
            HookPayload::Lifecycle(kind) => *kind,
        }
    }
}

fn decode<T: DeserializeOwned>(kind: HookEventKind, data: &Value) -> Result<T> {
    // Hooks sometimes omit `data` entirely for payload-free events
    let data = if data.is_null() {
        Value::Object(Default::default())
    } else {
        data.clone()
    };
    serde_json::from_value(data).map_err(|source| Error::Payload {
        kind: kind.as_str(),
        source,
    })
}
