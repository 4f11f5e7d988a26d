use std::path::PathBuf;
use std::process::ExitCode;

use crate::error::Result;
use crate::hook::HookInput;
use crate::snapshot::{GenerateRequest, SnapshotStore};

/// Build the generate request for a Stop or PreCompact event.
///
/// `None` when the event carries neither a transcript nor a final message.
pub fn request_from(input: &HookInput) -> Option<GenerateRequest> {
    let transcript_path = input
        .transcript_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);
    let last_message = input
        .last_assistant_message
        .clone()
        .filter(|m| !m.is_empty());
    if transcript_path.is_none() && last_message.is_none() {
        return None;
    }
    Some(GenerateRequest {
        transcript_path,
        cwd: input.cwd.clone(),
        session_id: input.session_id.clone(),
        last_message,
    })
}

/// Stop / PreCompact: save the session for a later `@LAST`.
///
/// Failures are logged, never surfaced to the hook runner.
pub async fn run() -> Result<ExitCode> {
    let Some(input) = super::read_event().await else {
        return Ok(ExitCode::SUCCESS);
    };
    let Some(request) = request_from(&input) else {
        tracing::debug!("no transcript or final message, skipping snapshot");
        return Ok(ExitCode::SUCCESS);
    };
    let store = SnapshotStore::from_config(&super::load_config());
    if let Err(e) = store.generate(&request) {
        tracing::warn!("snapshot not written: {e}");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_save() {
        let input = HookInput {
            cwd: "/p".into(),
            transcript_path: Some(String::new()),
            ..Default::default()
        };
        assert!(request_from(&input).is_none());
    }

    #[test]
    fn test_request_fields() {
        let input = HookInput {
            cwd: "/p".into(),
            session_id: "s1".into(),
            transcript_path: Some("/t/x.jsonl".into()),
            last_assistant_message: Some("bye".into()),
            ..Default::default()
        };
        let req = request_from(&input).unwrap();
        assert_eq!(req.transcript_path, Some(PathBuf::from("/t/x.jsonl")));
        assert_eq!(req.last_message.as_deref(), Some("bye"));
        assert_eq!(req.session_id, "s1");
    }
}
