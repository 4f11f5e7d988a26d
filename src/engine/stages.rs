use std::path::Path;
use std::sync::Arc;

use crate::catalog::PatternCatalog;
use crate::decision::{AccessDecision, AccessRequest, PatternTier};
use crate::error::Result;
use crate::scanner::{read_for_scan, ContentScanner};

use super::PolicyStage;

/// Tier 0: explicit basename allowlist. A hit ends evaluation with allow.
pub struct ExcludeStage {
    catalog: Arc<PatternCatalog>,
}

impl ExcludeStage {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }
}

impl PolicyStage for ExcludeStage {
    fn evaluate(&self, request: &AccessRequest) -> Option<AccessDecision> {
        let rule = self.catalog.match_exclude(&request.path)?;
        tracing::debug!(path = %request.path, pattern = %rule.pattern, "excluded");
        Some(AccessDecision::allow_by(PatternTier::Exclude))
    }

    fn tier(&self) -> PatternTier {
        PatternTier::Exclude
    }

    fn name(&self) -> &str {
        "exclude"
    }
}

/// Tier 1: sensitive directory fragment anywhere in the path.
pub struct DirectoryBlockStage {
    catalog: Arc<PatternCatalog>,
}

impl DirectoryBlockStage {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }
}

impl PolicyStage for DirectoryBlockStage {
    fn evaluate(&self, request: &AccessRequest) -> Option<AccessDecision> {
        let rule = self.catalog.match_directory(&request.path)?;
        Some(AccessDecision::block(
            PatternTier::DirectoryBlock,
            format!("sensitive directory: {}", rule.pattern),
        ))
    }

    fn tier(&self) -> PatternTier {
        PatternTier::DirectoryBlock
    }

    fn name(&self) -> &str {
        "directory-block"
    }
}

/// Tier 2: opaque or credential files, blocked on name alone.
pub struct AlwaysBlockStage {
    catalog: Arc<PatternCatalog>,
}

impl AlwaysBlockStage {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }
}

impl PolicyStage for AlwaysBlockStage {
    fn evaluate(&self, request: &AccessRequest) -> Option<AccessDecision> {
        let rule = self.catalog.match_always_block(&request.path)?;
        Some(AccessDecision::block(
            PatternTier::AlwaysBlock,
            format!("always-block pattern: {} ({})", rule.category, rule.pattern),
        ))
    }

    fn tier(&self) -> PatternTier {
        PatternTier::AlwaysBlock
    }

    fn name(&self) -> &str {
        "always-block"
    }
}

/// Where the ContentScan stage gets on-disk content from.
pub trait ContentSource: Send + Sync {
    /// Read the file at `path`, refusing anything over `limit` bytes.
    fn read(&self, path: &Path, limit: u64) -> Result<String>;
}

/// Reads straight from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskContent;

impl ContentSource for DiskContent {
    fn read(&self, path: &Path, limit: u64) -> Result<String> {
        read_for_scan(path, limit)
    }
}

/// Tier 3: text configs that are only blocked if their content matches a
/// credential signature.
///
/// `Write` is judged on the pending content; every other operation on what
/// is on disk. Content that cannot be obtained fails open.
pub struct ContentScanStage {
    catalog: Arc<PatternCatalog>,
    scanner: Arc<ContentScanner>,
    source: Box<dyn ContentSource>,
}

impl ContentScanStage {
    pub fn new(catalog: Arc<PatternCatalog>, scanner: Arc<ContentScanner>) -> Self {
        Self::with_source(catalog, scanner, Box::new(DiskContent))
    }

    pub fn with_source(
        catalog: Arc<PatternCatalog>,
        scanner: Arc<ContentScanner>,
        source: Box<dyn ContentSource>,
    ) -> Self {
        Self {
            catalog,
            scanner,
            source,
        }
    }
}

impl PolicyStage for ContentScanStage {
    fn evaluate(&self, request: &AccessRequest) -> Option<AccessDecision> {
        let rule = self.catalog.match_content_scan(&request.path)?;
        tracing::trace!(path = %request.path, category = %rule.category, "content-scan candidate");

        let scanned = if request.operation.scans_pending_content() {
            request.pending_content.clone().unwrap_or_default()
        } else {
            match self
                .source
                .read(Path::new(&request.path), self.scanner.max_scan_size())
            {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %request.path, "content unavailable, allowing: {e}");
                    return Some(AccessDecision::allow_by(PatternTier::ContentScan));
                }
            }
        };

        match self.scanner.scan(&scanned) {
            Some(description) => Some(AccessDecision::block(
                PatternTier::ContentScan,
                format!("sensitive content: {description}"),
            )),
            None => Some(AccessDecision::allow_by(PatternTier::ContentScan)),
        }
    }

    fn tier(&self) -> PatternTier {
        PatternTier::ContentScan
    }

    fn name(&self) -> &str {
        "content-scan"
    }
}
