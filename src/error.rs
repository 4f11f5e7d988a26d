use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HookGuardError {
    #[error("config parse error in {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("glob pattern error: {pattern}: {reason}")]
    GlobPattern { pattern: String, reason: String },

    #[error("invalid content signature: {reason}")]
    InvalidSignature { reason: String },

    #[error("cannot read {path} for scanning: {reason}")]
    UnreadableContent { path: PathBuf, reason: String },

    #[error("{path} is {size} bytes, over the {limit} byte scan limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("no snapshot available")]
    SnapshotUnavailable,

    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HookGuardError>;
