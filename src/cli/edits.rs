use std::process::ExitCode;

use crate::decision::Operation;
use crate::error::Result;
use crate::hook::HookInput;
use crate::storage::{EditLog, EditRecord};

/// Records for every file a mutating tool call touched.
pub fn records_for(input: &HookInput) -> Vec<EditRecord> {
    let Some(operation) = input.operation() else {
        return Vec::new();
    };
    if operation == Operation::Read {
        return Vec::new();
    }
    input
        .file_paths()
        .into_iter()
        .map(|file| {
            EditRecord::new(file, operation.to_string(), input.session_id.as_str()).with_cwd(&input.cwd)
        })
        .collect()
}

/// PostToolUse: append to the edit log that snapshots read.
pub async fn run() -> Result<ExitCode> {
    let Some(input) = super::read_event().await else {
        return Ok(ExitCode::SUCCESS);
    };
    let config = super::load_config();
    let log = EditLog::new(config.edits.resolved_log_file());
    for record in records_for(&input) {
        if let Err(e) = log.append(&record) {
            tracing::warn!("cannot record edit of {}: {}", record.file, e);
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_not_recorded() {
        let input = HookInput::parse(r#"{"tool_name":"Read","tool_input":{"file_path":"/p/a"}}"#)
            .unwrap()
            .unwrap();
        assert!(records_for(&input).is_empty());
    }

    #[test]
    fn test_write_is_recorded() {
        let input = HookInput::parse(
            r#"{"session_id":"s9","cwd":"/home/u/proj","tool_name":"Write","tool_input":{"file_path":"/home/u/proj/a.rs","content":"x"}}"#,
        )
        .unwrap()
        .unwrap();
        let records = records_for(&input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, "/home/u/proj/a.rs");
        assert_eq!(records[0].tool, "Write");
        assert_eq!(records[0].session, "s9");
        assert_eq!(records[0].project.as_deref(), Some("proj"));
    }
}
