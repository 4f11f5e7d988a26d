pub mod jsonl;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::snapshot::project_name;

pub use jsonl::EditLog;

/// Source of "which files were touched recently" for snapshots.
pub trait EditHistory: Send + Sync {
    /// Files edited within `window` before `now`, de-duplicated, in
    /// first-seen order.
    ///
    /// Edits recorded under a different working directory than `cwd` are
    /// left out. Edits with no recorded directory, and an empty `cwd`, are
    /// not filtered.
    fn recent_files(
        &self,
        cwd: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>>;
}

/// One line of the edit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    pub timestamp: DateTime<Utc>,
    pub file: String,
    pub tool: String,
    #[serde(rename = "session_id", alias = "session", default)]
    pub session: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl EditRecord {
    pub fn new(file: impl Into<String>, tool: impl Into<String>, session: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            file: file.into(),
            tool: tool.into(),
            session: session.into(),
            cwd: None,
            project: None,
        }
    }

    /// Record the working directory and derive the project name from it.
    pub fn with_cwd(mut self, cwd: &str) -> Self {
        if !cwd.is_empty() {
            self.project = Some(project_name(cwd).to_string());
            self.cwd = Some(cwd.to_string());
        }
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// An in-memory edit history, handy when no log should be touched.
#[derive(Debug, Default, Clone)]
pub struct StaticEdits(pub Vec<String>);

impl EditHistory for StaticEdits {
    fn recent_files(
        &self,
        _cwd: &str,
        _window: Duration,
        _now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_cwd_sets_project() {
        let rec = EditRecord::new("a.rs", "Edit", "s1").with_cwd("/home/u/proj/");
        assert_eq!(rec.project.as_deref(), Some("proj"));
        assert_eq!(rec.cwd.as_deref(), Some("/home/u/proj/"));

        let win = EditRecord::new("a.rs", "Edit", "s1").with_cwd(r"C:\work\proj");
        assert_eq!(win.project.as_deref(), Some("proj"));
    }

    #[test]
    fn test_empty_cwd_is_ignored() {
        let rec = EditRecord::new("a.rs", "Edit", "s1").with_cwd("");
        assert!(rec.cwd.is_none());
        assert!(rec.project.is_none());
    }

    #[test]
    fn test_session_field_accepts_both_names() {
        let a: EditRecord = serde_json::from_str(
            r#"{"timestamp":"2026-01-01T00:00:00Z","file":"x","tool":"Write","session":"s"}"#,
        )
        .unwrap();
        let b: EditRecord = serde_json::from_str(
            r#"{"timestamp":"2026-01-01T00:00:00Z","file":"x","tool":"Write","session_id":"s"}"#,
        )
        .unwrap();
        assert_eq!(a, b);
    }
}
