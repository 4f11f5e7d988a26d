use serde::{Deserialize, Serialize};

/// The four policy tiers, listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternTier {
    /// Explicit allowlist on the exact basename. Short-circuits to allow.
    Exclude,
    /// Sensitive directory fragment anywhere in the path.
    DirectoryBlock,
    /// Opaque or credential-bearing artifact, blocked without reading it.
    AlwaysBlock,
    /// Text config that is forwarded to the content scanner.
    ContentScan,
}

impl PatternTier {
    /// Fixed evaluation order of the access pipeline.
    pub const ORDER: [PatternTier; 4] = [
        PatternTier::Exclude,
        PatternTier::DirectoryBlock,
        PatternTier::AlwaysBlock,
        PatternTier::ContentScan,
    ];
}

impl std::fmt::Display for PatternTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternTier::Exclude => write!(f, "exclude"),
            PatternTier::DirectoryBlock => write!(f, "directory-block"),
            PatternTier::AlwaysBlock => write!(f, "always-block"),
            PatternTier::ContentScan => write!(f, "content-scan"),
        }
    }
}

/// The kind of file operation being policed.
///
/// `Write` is the odd one out: it is judged on the content about to be
/// written, every other kind on what is currently on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Read,
    Write,
    Edit,
    MultiEdit,
}

impl Operation {
    /// Map an assistant tool name onto an operation. Non-file tools map to `None`.
    pub fn from_tool_name(tool: &str) -> Option<Self> {
        match tool {
            "Read" => Some(Operation::Read),
            "Write" => Some(Operation::Write),
            "Edit" => Some(Operation::Edit),
            "MultiEdit" => Some(Operation::MultiEdit),
            _ => None,
        }
    }

    pub fn scans_pending_content(&self) -> bool {
        matches!(self, Operation::Write)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Read => write!(f, "Read"),
            Operation::Write => write!(f, "Write"),
            Operation::Edit => write!(f, "Edit"),
            Operation::MultiEdit => write!(f, "MultiEdit"),
        }
    }
}

/// One file access to evaluate.
#[derive(Debug, Clone)]
pub struct AccessRequest {
    pub path: String,
    pub operation: Operation,
    /// Content about to be written. Only consulted for `Operation::Write`.
    pub pending_content: Option<String>,
}

impl AccessRequest {
    pub fn new(path: impl Into<String>, operation: Operation) -> Self {
        Self {
            path: path.into(),
            operation,
            pending_content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.pending_content = Some(content.into());
        self
    }
}

/// The outcome of evaluating one access request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub allowed: bool,

    /// Human-readable reason. Always non-empty when `allowed` is false.
    pub reason: String,

    /// The tier that decided, if any tier matched.
    pub tier: Option<PatternTier>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: String::new(),
            tier: None,
        }
    }

    pub fn allow_by(tier: PatternTier) -> Self {
        Self {
            allowed: true,
            reason: String::new(),
            tier: Some(tier),
        }
    }

    pub fn block(tier: PatternTier, reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
            tier: Some(tier),
        }
    }

    pub fn is_blocked(&self) -> bool {
        !self.allowed
    }
}

impl std::fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.allowed {
            write!(f, "allow")
        } else {
            write!(f, "block: {}", self.reason)
        }
    }
}
