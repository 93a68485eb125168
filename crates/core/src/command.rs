//! Command definitions and the notification payload sent to Poppit.
//!
//! A [`CommandDefinition`] is a named job template loaded from the config
//! file. Dispatching one copies its job fields into a
//! [`NotificationMessage`], which Poppit consumes from the queue list.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named, statically configured job template rendered as a button.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandDefinition {
    /// Label shown on the button; also the lookup key for dispatch.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub branch: String,
    #[serde(rename = "type", default)]
    pub command_type: String,
    #[serde(default)]
    pub dir: String,
    /// Shell commands, executed by Poppit in order.
    #[serde(default)]
    pub commands: Vec<String>,
}

/// Queue entry consumed by Poppit.
///
/// Wire format: `{"repo","branch","type","dir","commands"}`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationMessage {
    pub repo: String,
    pub branch: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub dir: String,
    pub commands: Vec<String>,
}

impl NotificationMessage {
    /// Serialize to the JSON string pushed onto the queue list.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<&CommandDefinition> for NotificationMessage {
    fn from(def: &CommandDefinition) -> Self {
        Self {
            repo: def.repo.clone(),
            branch: def.branch.clone(),
            notification_type: def.command_type.clone(),
            dir: def.dir.clone(),
            commands: def.commands.clone(),
        }
    }
}

/// Find the first definition whose name matches exactly.
pub fn find_by_name<'a>(
    definitions: &'a [CommandDefinition],
    name: &str,
) -> Option<&'a CommandDefinition> {
    definitions.iter().find(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deploy() -> CommandDefinition {
        CommandDefinition {
            name: "Deploy".to_string(),
            repo: "org/app".to_string(),
            branch: "main".to_string(),
            command_type: "deploy".to_string(),
            dir: "/srv".to_string(),
            commands: vec!["make deploy".to_string()],
        }
    }

    #[test]
    fn notification_copies_job_fields() {
        let def = deploy();
        let msg = NotificationMessage::from(&def);

        assert_eq!(msg.repo, def.repo);
        assert_eq!(msg.branch, def.branch);
        assert_eq!(msg.notification_type, def.command_type);
        assert_eq!(msg.dir, def.dir);
        assert_eq!(msg.commands, def.commands);
    }

    #[test]
    fn notification_json_matches_poppit_format() {
        let json = NotificationMessage::from(&deploy()).to_json().unwrap();
        assert_eq!(
            json,
            r#"{"repo":"org/app","branch":"main","type":"deploy","dir":"/srv","commands":["make deploy"]}"#
        );
    }

    #[test]
    fn notification_json_keeps_empty_command_list() {
        let mut def = deploy();
        def.commands.clear();

        let json = NotificationMessage::from(&def).to_json().unwrap();
        assert!(json.ends_with(r#""commands":[]}"#));
    }

    #[test]
    fn find_by_name_returns_first_match() {
        let mut second = deploy();
        second.repo = "org/other".to_string();
        let defs = vec![deploy(), second];

        let found = find_by_name(&defs, "Deploy").unwrap();
        assert_eq!(found.repo, "org/app");
    }

    #[test]
    fn find_by_name_is_case_sensitive() {
        let defs = vec![deploy()];
        assert!(find_by_name(&defs, "deploy").is_none());
        assert!(find_by_name(&defs, "").is_none());
    }
}
