use serde::{Deserialize, Serialize};

/// Multi-agent coordination record, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LinkEvent {
    Task(TaskLink),
    Spawn(LinkStamp),
    MsgSend(LinkStamp),
    TeammateIdle(LinkStamp),
    TaskComplete(LinkStamp),
    Stop(LinkStamp),
    ConfigChange(LinkStamp),
}

impl LinkEvent {
    pub fn t(&self) -> i64 {
        match self {
            LinkEvent::Task(task) => task.t,
            LinkEvent::Spawn(s)
            | LinkEvent::MsgSend(s)
            | LinkEvent::TeammateIdle(s)
            | LinkEvent::TaskComplete(s)
            | LinkEvent::Stop(s)
            | LinkEvent::ConfigChange(s) => s.t,
        }
    }
}

/// Link kinds the timeline does not render only need their timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStamp {
    pub t: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLink {
    pub t: i64,
    pub action: TaskAction,
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl TaskLink {
    /// Subject when known, task id otherwise
    pub fn label(&self) -> &str {
        self.subject.as_deref().unwrap_or(&self.task_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    Create,
    Assign,
    Update,
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_link_parses() {
        let link: LinkEvent = serde_json::from_str(
            r#"{"type": "task", "t": 42, "action": "assign", "task_id": "7", "owner": "tester"}"#,
        )
        .unwrap();

        match &link {
            LinkEvent::Task(task) => {
                assert_eq!(task.action, TaskAction::Assign);
                assert_eq!(task.owner.as_deref(), Some("tester"));
                assert_eq!(task.label(), "7");
            }
            other => panic!("Wrong link: {:?}", other),
        }
        assert_eq!(link.t(), 42);
    }

    #[test]
    fn test_other_link_kinds_ignore_extra_fields() {
        let link: LinkEvent = serde_json::from_str(
            r#"{"type": "msg_send", "t": 9, "from": "lead", "to": "worker", "body": "go"}"#,
        )
        .unwrap();
        assert_eq!(link, LinkEvent::MsgSend(LinkStamp { t: 9 }));
    }

    #[test]
    fn test_unknown_task_action() {
        let link: LinkEvent = serde_json::from_str(
            r#"{"type": "task", "t": 1, "action": "archive", "task_id": "3"}"#,
        )
        .unwrap();
        assert!(matches!(link, LinkEvent::Task(TaskLink { action: TaskAction::Other, .. })));
    }
}
