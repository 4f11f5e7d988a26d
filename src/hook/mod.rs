//! JSON exchanged with the assistant's hook runner.
//!
//! Every hook gets one event object on stdin. Unknown fields are ignored
//! and every known field is optional, since each event kind fills in a
//! different subset.

use serde::{Deserialize, Serialize};

use crate::decision::{AccessRequest, Operation};

/// Event names used in `hookSpecificOutput`.
pub const USER_PROMPT_SUBMIT: &str = "UserPromptSubmit";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub cwd: String,
    #[serde(default)]
    pub transcript_path: Option<String>,
    #[serde(default)]
    pub hook_event_name: Option<String>,
    /// Only present for UserPromptSubmit
    #[serde(default)]
    pub prompt: Option<String>,
    /// Only present for PreToolUse/PostToolUse
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: ToolInput,
    /// SessionStart trigger ("startup", "resume", "clear", "compact")
    #[serde(default)]
    pub source: Option<String>,
    /// Stop/SubagentStop carry the final assistant message verbatim.
    #[serde(default)]
    pub last_assistant_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub edits: Vec<EditEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditEntry {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub old_string: Option<String>,
    #[serde(default)]
    pub new_string: Option<String>,
}

impl HookInput {
    /// Parse one event. Blank input is `None`.
    pub fn parse(raw: &str) -> serde_json::Result<Option<Self>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(raw).map(Some)
    }

    /// The guarded operation named by `tool_name`, if any.
    pub fn operation(&self) -> Option<Operation> {
        self.tool_name.as_deref().and_then(Operation::from_tool_name)
    }

    /// Files the tool call touches, in order, without duplicates.
    pub fn file_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        let mut push = |p: &Option<String>| {
            if let Some(p) = p.as_deref().filter(|p| !p.is_empty()) {
                if !paths.iter().any(|seen| seen == p) {
                    paths.push(p.to_string());
                }
            }
        };
        push(&self.tool_input.file_path);
        if self.operation() == Some(Operation::MultiEdit) {
            for edit in &self.tool_input.edits {
                push(&edit.file_path);
            }
        }
        paths
    }

    /// One access request per touched file. Empty for unguarded tools.
    pub fn access_requests(&self) -> Vec<AccessRequest> {
        let Some(operation) = self.operation() else {
            return Vec::new();
        };
        self.file_paths()
            .into_iter()
            .map(|path| {
                let request = AccessRequest::new(path, operation);
                match (&self.tool_input.content, operation.scans_pending_content()) {
                    (Some(content), true) => request.with_content(content.clone()),
                    _ => request,
                }
            })
            .collect()
    }

    /// Whether the prompt asks for the previous session's context.
    pub fn requests_last_context(&self) -> bool {
        self.prompt
            .as_deref()
            .is_some_and(|p| p.to_ascii_uppercase().contains("@LAST"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HookOutput {
    #[serde(rename = "continue", skip_serializing_if = "std::ops::Not::not")]
    pub continue_: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookSpecificOutput {
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,
    #[serde(rename = "additionalContext")]
    pub additional_context: String,
}

impl HookOutput {
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            decision: Some("block".into()),
            reason: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn continue_response() -> Self {
        Self {
            continue_: true,
            ..Default::default()
        }
    }

    pub fn continue_with_message(message: impl Into<String>) -> Self {
        Self {
            continue_: true,
            system_message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Inject context into the prompt the assistant is about to see.
    pub fn user_prompt_context(context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: USER_PROMPT_SUBMIT.into(),
                additional_context: context.into(),
            }),
            ..Default::default()
        }
    }

    pub fn with_system_message(mut self, message: impl Into<String>) -> Self {
        self.system_message = Some(message.into());
        self
    }

    pub fn to_json(&self) -> String {
        // Only strings and bools: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".into())
    }
}
