use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::RegexSet;

use crate::catalog::{default_signatures, ContentSignature};
use crate::config::DEFAULT_MAX_SCAN_SIZE;
use crate::error::{HookGuardError, Result};

static BUILTIN: LazyLock<Arc<ContentScanner>> = LazyLock::new(|| {
    let signatures = default_signatures().expect("built-in signatures should compile");
    Arc::new(ContentScanner::new(signatures).expect("built-in signatures should form a RegexSet"))
});

/// Tests text against an ordered list of credential signatures.
///
/// A `RegexSet` answers "does anything match" in one pass; the lowest
/// matching index is the first signature in catalog order.
#[derive(Clone)]
pub struct ContentScanner {
    set: RegexSet,
    signatures: Vec<ContentSignature>,
    max_scan_size: u64,
}

impl std::fmt::Debug for ContentScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentScanner")
            .field("signatures", &self.signatures.len())
            .field("max_scan_size", &self.max_scan_size)
            .finish()
    }
}

impl ContentScanner {
    pub fn new(signatures: Vec<ContentSignature>) -> Result<Self> {
        let set = RegexSet::new(signatures.iter().map(|s| s.regex.as_str())).map_err(|e| {
            HookGuardError::InvalidSignature {
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            set,
            signatures,
            max_scan_size: DEFAULT_MAX_SCAN_SIZE,
        })
    }

    /// The shared scanner over the built-in signatures and default size cap.
    pub fn builtin() -> Arc<ContentScanner> {
        Arc::clone(&BUILTIN)
    }

    pub fn with_max_scan_size(mut self, max_scan_size: u64) -> Self {
        self.max_scan_size = max_scan_size;
        self
    }

    pub fn max_scan_size(&self) -> u64 {
        self.max_scan_size
    }

    pub fn signatures(&self) -> &[ContentSignature] {
        &self.signatures
    }

    /// First matching signature in catalog order.
    pub fn find(&self, text: &str) -> Option<&ContentSignature> {
        if text.is_empty() {
            return None;
        }
        let idx = self.set.matches(text).iter().next()?;
        Some(&self.signatures[idx])
    }

    /// Description of the first matching signature, if any.
    pub fn scan(&self, text: &str) -> Option<&str> {
        self.find(text).map(|s| s.description.as_str())
    }

    /// Read a file for scanning under this scanner's size cap.
    pub fn read_for_scan(&self, path: &Path) -> Result<String> {
        read_for_scan(path, self.max_scan_size)
    }

    /// Per-line findings across a whole text.
    pub fn scan_lines(&self, file: &Path, text: &str) -> Vec<SecretFinding> {
        text.lines()
            .enumerate()
            .filter_map(|(i, line)| {
                self.scan(line).map(|description| SecretFinding {
                    file: file.to_path_buf(),
                    line: i + 1,
                    description: description.to_string(),
                })
            })
            .collect()
    }
}

/// A potential secret found while scanning a file line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretFinding {
    pub file: PathBuf,
    pub line: usize,
    pub description: String,
}

/// Read a regular file as text, refusing anything over `limit` bytes.
///
/// Non-UTF-8 bytes are replaced rather than rejected so that partially
/// binary files can still be scanned.
pub fn read_for_scan(path: &Path, limit: u64) -> Result<String> {
    let unreadable = |reason: String| HookGuardError::UnreadableContent {
        path: path.to_path_buf(),
        reason,
    };

    let meta = fs::metadata(path).map_err(|e| unreadable(e.to_string()))?;
    if !meta.is_file() {
        return Err(unreadable("not a regular file".into()));
    }
    if meta.len() > limit {
        return Err(HookGuardError::FileTooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            limit,
        });
    }
    let bytes = fs::read(path).map_err(|e| unreadable(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
