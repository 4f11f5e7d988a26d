use std::process::ExitCode;

use crate::decision::AccessDecision;
use crate::engine::AccessEngine;
use crate::error::Result;
use crate::hook::{HookInput, HookOutput};

/// Exit status the hook runner treats as "refuse this tool call".
pub const BLOCK_EXIT: u8 = 2;

/// Decide a tool call. `None` when the tool is not file-guarded.
pub fn decide(engine: &AccessEngine, input: &HookInput) -> Option<AccessDecision> {
    let requests = input.access_requests();
    if requests.is_empty() {
        return None;
    }
    Some(engine.evaluate_all(&requests))
}

/// PreToolUse: refuse reads and writes of sensitive files.
pub async fn run() -> Result<ExitCode> {
    let Some(input) = super::read_event().await else {
        return Ok(ExitCode::SUCCESS);
    };

    let config = super::load_config();
    let engine = AccessEngine::from_config(&config).unwrap_or_else(|e| {
        tracing::warn!("{e}; using built-in catalog");
        AccessEngine::builtin()
    });

    let Some(decision) = decide(&engine, &input) else {
        return Ok(ExitCode::SUCCESS);
    };
    if decision.allowed {
        return Ok(ExitCode::SUCCESS);
    }

    let paths = input.file_paths().join(", ");
    super::emit(&HookOutput::block(format!(
        "Access to sensitive file denied ({paths}): {}",
        decision.reason
    )));
    eprintln!("hookguard: BLOCKED: access to sensitive file denied");
    eprintln!("   file:   {paths}");
    eprintln!("   reason: {}", decision.reason);
    eprintln!("   add the file to extra_exclude in the hookguard config if this is intended");
    Ok(ExitCode::from(BLOCK_EXIT))
}
