pub mod git;
pub mod key;
mod lock;
pub mod render;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{Local, Utc};

use crate::config::GuardConfig;
use crate::error::{HookGuardError, Result};
use crate::storage::{EditHistory, EditLog, StaticEdits};
use crate::transcript::{self, ConversationTurn, Role, TurnLimits};

pub use git::{GitCli, GitStatusProvider, NoGit};
pub use key::{canonical_dir, working_dir_key};
pub use render::{project_name, Snapshot};

use lock::FileLock;

pub const SNAPSHOT_PREFIX: &str = "hookguard_last_context_";
pub const SNAPSHOT_EXT: &str = "md";
pub const CONSUMED_EXT: &str = "consumed";

/// Default staleness window.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

const DEFAULT_EDIT_WINDOW_MINUTES: i64 = 60;

fn default_edit_window() -> chrono::Duration {
    chrono::Duration::minutes(DEFAULT_EDIT_WINDOW_MINUTES)
}

/// Inputs to [`SnapshotStore::generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub transcript_path: Option<PathBuf>,
    pub cwd: String,
    pub session_id: String,
    /// The caller's copy of the final assistant message. When non-empty it
    /// wins over whatever the transcript holds for that turn.
    pub last_message: Option<String>,
}

/// One markdown file per working directory, consumed at most once.
///
/// `generate` and `consume` for a key serialize on an advisory lock, so a
/// second consumer either sees the `.consumed` rename or nothing at all.
pub struct SnapshotStore {
    dir: PathBuf,
    limits: TurnLimits,
    max_age: Duration,
    edits: Box<dyn EditHistory>,
    edit_window: chrono::Duration,
    git: Box<dyn GitStatusProvider>,
}

impl SnapshotStore {
    /// A store in `dir` with default budgets and no edit log or git.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            limits: TurnLimits::default(),
            max_age: DEFAULT_MAX_AGE,
            edits: Box::new(StaticEdits::default()),
            edit_window: default_edit_window(),
            git: Box::new(NoGit),
        }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        let git: Box<dyn GitStatusProvider> = if config.git.enabled {
            Box::new(GitCli)
        } else {
            Box::new(NoGit)
        };
        let max_age = Duration::from_secs(config.snapshot.max_age_hours.saturating_mul(60 * 60));
        let window = chrono::Duration::try_minutes(config.edits.window_minutes).unwrap_or_else(|| {
            tracing::warn!(
                "edits.window_minutes {} out of range, using {DEFAULT_EDIT_WINDOW_MINUTES}",
                config.edits.window_minutes
            );
            default_edit_window()
        });
        Self::new(config.snapshot.resolved_dir())
            .with_limits(TurnLimits::from(&config.snapshot))
            .with_max_age(max_age)
            .with_edits(
                Box::new(EditLog::new(config.edits.resolved_log_file())),
                window,
            )
            .with_git(git)
    }

    pub fn with_limits(mut self, limits: TurnLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_edits(mut self, edits: Box<dyn EditHistory>, window: chrono::Duration) -> Self {
        self.edits = edits;
        self.edit_window = window;
        self
    }

    pub fn with_git(mut self, git: Box<dyn GitStatusProvider>) -> Self {
        self.git = git;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Snapshot file for a working directory.
    pub fn path_for(&self, cwd: &str) -> PathBuf {
        self.dir.join(format!(
            "{}{}.{}",
            SNAPSHOT_PREFIX,
            working_dir_key(cwd),
            SNAPSHOT_EXT
        ))
    }

    /// Where a consumed snapshot is moved to.
    pub fn consumed_path_for(&self, cwd: &str) -> PathBuf {
        self.path_for(cwd).with_extension(CONSUMED_EXT)
    }

    /// Assemble the snapshot without writing it.
    pub fn build(&self, request: &GenerateRequest) -> Snapshot {
        let mut turns = match &request.transcript_path {
            Some(path) => transcript::extract(path, &self.limits).unwrap_or_else(|e| {
                tracing::warn!("cannot read transcript {}: {}", path.display(), e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        if let Some(message) = request.last_message.as_deref().filter(|m| !m.is_empty()) {
            override_last_assistant(&mut turns, message, &self.limits);
        }

        let edited_files = self
            .edits
            .recent_files(&request.cwd, self.edit_window, Utc::now())
            .unwrap_or_else(|e| {
                tracing::warn!("cannot read edit log: {e}");
                Vec::new()
            });

        let git_status = if request.cwd.is_empty() {
            String::new()
        } else {
            self.git.status(Path::new(&request.cwd))
        };

        Snapshot {
            saved_at: Local::now(),
            project: project_name(&request.cwd).to_string(),
            turns,
            edited_files,
            git_status,
        }
    }

    /// Build and write the snapshot for `request.cwd`, replacing any
    /// previous one.
    pub fn generate(&self, request: &GenerateRequest) -> Result<PathBuf> {
        let snapshot = self.build(request);
        let path = self.path_for(&request.cwd);
        fs::create_dir_all(&self.dir)?;

        let _lock = FileLock::acquire(&path)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(snapshot.render().as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| HookGuardError::Io(e.error))?;

        tracing::info!(
            session = %request.session_id,
            turns = snapshot.turns.len(),
            files = snapshot.edited_files.len(),
            "snapshot written to {}",
            path.display()
        );
        Ok(path)
    }

    pub fn is_available(&self, cwd: &str) -> bool {
        self.is_available_at(cwd, SystemTime::now())
    }

    /// Availability as seen at `now`.
    pub fn is_available_at(&self, cwd: &str, now: SystemTime) -> bool {
        self.is_fresh(&self.path_for(cwd), now)
    }

    fn is_fresh(&self, path: &Path, now: SystemTime) -> bool {
        let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
            return false;
        };
        match now.duration_since(modified) {
            Ok(age) => age < self.max_age,
            // Modified "in the future": clock skew, treat as fresh.
            Err(_) => true,
        }
    }

    /// Read the snapshot for `cwd` and retire it.
    ///
    /// Fails with [`HookGuardError::SnapshotUnavailable`] when there is no
    /// snapshot, it is stale, or it was already consumed.
    pub fn consume(&self, cwd: &str) -> Result<String> {
        let path = self.path_for(cwd);
        if !path.exists() {
            return Err(HookGuardError::SnapshotUnavailable);
        }

        let _lock = FileLock::acquire(&path)?;
        if !self.is_fresh(&path, SystemTime::now()) {
            return Err(HookGuardError::SnapshotUnavailable);
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("snapshot {} unreadable: {}", path.display(), e);
                return Err(HookGuardError::SnapshotUnavailable);
            }
        };

        if let Err(e) = fs::rename(&path, path.with_extension(CONSUMED_EXT)) {
            tracing::warn!("cannot mark {} consumed ({}), removing", path.display(), e);
            fs::remove_file(&path)?;
        }

        tracing::info!("snapshot consumed from {}", path.display());
        Ok(content)
    }
}

/// Replace the latest assistant turn with `message`, or append it when the
/// transcript had none, then re-apply the budgets.
fn override_last_assistant(turns: &mut Vec<ConversationTurn>, message: &str, limits: &TurnLimits) {
    let text = transcript::truncate_text(message, limits.max_turn_len);
    match turns.iter_mut().rev().find(|t| t.role == Role::Assistant) {
        Some(turn) => turn.text = text,
        None => turns.push(ConversationTurn::new(Role::Assistant, text)),
    }
    *turns = transcript::apply_limits(std::mem::take(turns), limits);
}
