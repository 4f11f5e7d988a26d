pub mod edits;
pub mod guard;
pub mod hint;
pub mod prompt;
pub mod scan;
pub mod snapshot;

use tokio::io::AsyncReadExt;

use crate::config::GuardConfig;
use crate::hook::{HookInput, HookOutput};

/// Read the hook event from stdin.
///
/// An empty, unreadable or malformed event is `None`: a hook must never
/// wedge the assistant over bad input.
pub(crate) async fn read_event() -> Option<HookInput> {
    let mut raw = String::new();
    if let Err(e) = tokio::io::stdin().read_to_string(&mut raw).await {
        tracing::warn!("cannot read hook event: {e}");
        return None;
    }
    match HookInput::parse(&raw) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!("ignoring malformed hook event: {e}");
            None
        }
    }
}

/// Config with a fallback to defaults when the file is broken.
pub(crate) fn load_config() -> GuardConfig {
    GuardConfig::load().unwrap_or_else(|e| {
        tracing::warn!("{e}; using defaults");
        GuardConfig::default()
    })
}

pub(crate) fn emit(output: &HookOutput) {
    println!("{}", output.to_json());
}
