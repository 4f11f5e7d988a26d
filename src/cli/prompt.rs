use std::process::ExitCode;

use crate::error::{HookGuardError, Result};
use crate::hook::{HookInput, HookOutput};
use crate::snapshot::SnapshotStore;

pub const LOADED_MESSAGE: &str = "Previous session context loaded";
pub const UNAVAILABLE_MESSAGE: &str = "No previous context snapshot available";

/// Answer a prompt; `@LAST` pulls in the previous session's snapshot.
pub fn respond(store: &SnapshotStore, input: &HookInput) -> HookOutput {
    if !input.requests_last_context() {
        return HookOutput::continue_response();
    }
    match store.consume(&input.cwd) {
        Ok(content) if !content.trim().is_empty() => HookOutput::user_prompt_context(format!(
            "\n---\n## Previous Session Context\n{content}"
        ))
        .with_system_message(LOADED_MESSAGE),
        Ok(_) | Err(HookGuardError::SnapshotUnavailable) => {
            HookOutput::continue_with_message(UNAVAILABLE_MESSAGE)
        }
        Err(e) => {
            tracing::warn!("snapshot consume failed: {e}");
            HookOutput::continue_with_message(UNAVAILABLE_MESSAGE)
        }
    }
}

/// UserPromptSubmit.
pub async fn run() -> Result<ExitCode> {
    let Some(input) = super::read_event().await else {
        return Ok(ExitCode::SUCCESS);
    };
    let store = SnapshotStore::from_config(&super::load_config());
    super::emit(&respond(&store, &input));
    Ok(ExitCode::SUCCESS)
}
