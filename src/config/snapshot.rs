use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Snapshot store and transcript budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Directory holding snapshot files. Defaults to the system temp dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Most recent turns kept. Default: 6.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Per-turn text budget in bytes. Default: 4000.
    #[serde(default = "default_max_turn_len")]
    pub max_turn_len: usize,

    /// Combined budget for all kept turns in bytes. Default: 20000.
    #[serde(default = "default_max_total_len")]
    pub max_total_len: usize,

    /// Staleness window in hours. Default: 24.
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u64,
}

fn default_max_turns() -> usize {
    6
}
fn default_max_turn_len() -> usize {
    4000
}
fn default_max_total_len() -> usize {
    20000
}
fn default_max_age_hours() -> u64 {
    24
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: None,
            max_turns: default_max_turns(),
            max_turn_len: default_max_turn_len(),
            max_total_len: default_max_total_len(),
            max_age_hours: default_max_age_hours(),
        }
    }
}

impl SnapshotConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Where the edit log lives and how far back it is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditsConfig {
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Only edits newer than this many minutes are listed. Default: 60.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: i64,
}

fn default_window_minutes() -> i64 {
    60
}

impl Default for EditsConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            window_minutes: default_window_minutes(),
        }
    }
}

impl EditsConfig {
    /// `~/.claude/logs/edits.jsonl` unless overridden.
    pub fn resolved_log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| super::home_dir().join(".claude").join("logs").join("edits.jsonl"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Include `git status -s` in snapshots. Default: true.
    #[serde(default = "default_git_enabled")]
    pub enabled: bool,
}

fn default_git_enabled() -> bool {
    true
}

impl Default for GitConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
