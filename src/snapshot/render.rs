use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::transcript::ConversationTurn;

/// Everything that goes into one snapshot file.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub saved_at: DateTime<Local>,
    pub project: String,
    pub turns: Vec<ConversationTurn>,
    pub edited_files: Vec<String>,
    pub git_status: String,
}

impl Snapshot {
    /// Markdown form. Empty sections are left out.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("# Last Session Context\n");
        let _ = writeln!(
            out,
            "_Saved: {} | Project: {}_",
            self.saved_at.format("%Y-%m-%d %H:%M"),
            self.project
        );

        if !self.turns.is_empty() {
            out.push_str("\n## Recent Conversation\n");
            for turn in &self.turns {
                let _ = write!(out, "\n### {}\n{}\n", turn.role, turn.text);
            }
        }

        if !self.edited_files.is_empty() {
            out.push_str("\n## Modified Files\n");
            for file in &self.edited_files {
                let _ = writeln!(out, "- {file}");
            }
        }

        if !self.git_status.is_empty() {
            let _ = write!(out, "\n## Git Changes\n```\n{}\n```\n", self.git_status);
        }

        out
    }
}

/// Last component of the working directory.
pub fn project_name(cwd: &str) -> &str {
    cwd.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
}
