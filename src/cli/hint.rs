use std::process::ExitCode;

use crate::error::Result;
use crate::hook::{HookInput, HookOutput};
use crate::snapshot::SnapshotStore;

pub const HINT_MESSAGE: &str =
    "A snapshot of the previous session is available. Type @LAST to load it.";

/// SessionStart: point at `@LAST` on fresh sessions that have a snapshot.
pub fn respond(store: &SnapshotStore, input: &HookInput) -> HookOutput {
    let fresh_start = matches!(input.source.as_deref(), None | Some("" | "startup" | "clear"));
    if fresh_start && store.is_available(&input.cwd) {
        HookOutput::continue_with_message(HINT_MESSAGE)
    } else {
        HookOutput::continue_response()
    }
}

pub async fn run() -> Result<ExitCode> {
    let output = match super::read_event().await {
        Some(input) => {
            let store = SnapshotStore::from_config(&super::load_config());
            respond(&store, &input)
        }
        None => HookOutput::continue_response(),
    };
    super::emit(&output);
    Ok(ExitCode::SUCCESS)
}
