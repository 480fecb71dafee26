use std::collections::HashMap;

/// What to show when neither the event nor the name map knows the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFallback {
    /// First `/`-separated segment of the agent id
    TruncatedId,
    /// The agent id verbatim
    RawId,
    /// Leave the name unset
    Omit,
}

/// Resolve a display name for an agent.
///
/// Precedence is fixed: explicit name carried by the event, then the
/// id→name map, then `fallback` applied to the id. Empty strings count as
/// absent at every step.
pub fn resolve_agent_name(
    explicit: Option<&str>,
    agent_id: Option<&str>,
    names: Option<&HashMap<String, String>>,
    fallback: NameFallback,
) -> Option<String> {
    if let Some(name) = explicit.filter(|n| !n.is_empty()) {
        return Some(name.to_string());
    }

    let agent_id = agent_id.filter(|id| !id.is_empty())?;

    if let Some(name) = names
        .and_then(|map| map.get(agent_id))
        .filter(|n| !n.is_empty())
    {
        return Some(name.clone());
    }

    match fallback {
        NameFallback::TruncatedId => agent_id.split('/').next().map(str::to_string),
        NameFallback::RawId => Some(agent_id.to_string()),
        NameFallback::Omit => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> HashMap<String, String> {
        HashMap::from([("agent-7/worker".to_string(), "reviewer".to_string())])
    }

    #[test]
    fn test_explicit_name_wins() {
        let map = names();
        let name = resolve_agent_name(
            Some("lead"),
            Some("agent-7/worker"),
            Some(&map),
            NameFallback::TruncatedId,
        );
        assert_eq!(name.as_deref(), Some("lead"));
    }

    #[test]
    fn test_map_lookup_before_fallback() {
        let map = names();
        let name = resolve_agent_name(None, Some("agent-7/worker"), Some(&map), NameFallback::Omit);
        assert_eq!(name.as_deref(), Some("reviewer"));
    }

    #[test]
    fn test_truncated_id_fallback() {
        let name =
            resolve_agent_name(None, Some("agent-9/sub/x"), None, NameFallback::TruncatedId);
        assert_eq!(name.as_deref(), Some("agent-9"));
    }

    #[test]
    fn test_omit_and_raw_fallbacks() {
        assert_eq!(
            resolve_agent_name(None, Some("a/b"), None, NameFallback::Omit),
            None
        );
        assert_eq!(
            resolve_agent_name(Some(""), Some("a/b"), None, NameFallback::RawId).as_deref(),
            Some("a/b")
        );
        assert_eq!(
            resolve_agent_name(None, None, None, NameFallback::RawId),
            None
        );
    }
}
