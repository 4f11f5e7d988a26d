pub mod stages;

use std::sync::Arc;

use crate::catalog::PatternCatalog;
use crate::config::GuardConfig;
use crate::decision::{AccessDecision, AccessRequest, Operation, PatternTier};
use crate::error::Result;
use crate::scanner::ContentScanner;

pub use stages::{
    AlwaysBlockStage, ContentScanStage, ContentSource, DirectoryBlockStage, DiskContent,
    ExcludeStage,
};

/// A single stage of the access pipeline.
///
/// Returning `Some` ends evaluation; `None` passes the request on.
pub trait PolicyStage: Send + Sync {
    fn evaluate(&self, request: &AccessRequest) -> Option<AccessDecision>;

    /// The tier this stage implements.
    fn tier(&self) -> PatternTier;

    /// Name of this stage (for logging/debugging).
    fn name(&self) -> &str;
}

/// Runs the policy stages in order and stops at the first decision.
pub struct AccessEngine {
    stages: Vec<Box<dyn PolicyStage>>,
}

impl AccessEngine {
    /// The standard pipeline: Exclude -> DirectoryBlock -> AlwaysBlock -> ContentScan.
    pub fn new(catalog: Arc<PatternCatalog>, scanner: Arc<ContentScanner>) -> Self {
        Self {
            stages: vec![
                Box::new(ExcludeStage::new(Arc::clone(&catalog))),
                Box::new(DirectoryBlockStage::new(Arc::clone(&catalog))),
                Box::new(AlwaysBlockStage::new(Arc::clone(&catalog))),
                Box::new(ContentScanStage::new(catalog, scanner)),
            ],
        }
    }

    /// Built-in catalog and signatures with the default scan size cap.
    pub fn builtin() -> Self {
        Self::new(PatternCatalog::builtin(), ContentScanner::builtin())
    }

    /// Built-in tables extended by user patterns, with the configured size cap.
    pub fn from_config(config: &GuardConfig) -> Result<Self> {
        let catalog = Arc::new(PatternCatalog::from_config(&config.catalog)?);
        let scanner = ContentScanner::builtin()
            .as_ref()
            .clone()
            .with_max_scan_size(config.scan.max_scan_size);
        Ok(Self::new(catalog, Arc::new(scanner)))
    }

    /// A pipeline made of arbitrary stages, run in the given order.
    pub fn with_stages(stages: Vec<Box<dyn PolicyStage>>) -> Self {
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Evaluate one request. No matching stage means allow.
    pub fn evaluate(&self, request: &AccessRequest) -> AccessDecision {
        for stage in &self.stages {
            if let Some(decision) = stage.evaluate(request) {
                tracing::debug!(
                    path = %request.path,
                    operation = %request.operation,
                    stage = stage.name(),
                    "{decision}"
                );
                return decision;
            }
        }
        AccessDecision::allow()
    }

    /// Convenience wrapper over [`AccessEngine::evaluate`].
    pub fn check(
        &self,
        path: &str,
        operation: Operation,
        pending_content: Option<&str>,
    ) -> AccessDecision {
        let mut request = AccessRequest::new(path, operation);
        request.pending_content = pending_content.map(String::from);
        self.evaluate(&request)
    }

    /// Evaluate several files from one event, stopping at the first block.
    pub fn evaluate_all<'a, I>(&self, requests: I) -> AccessDecision
    where
        I: IntoIterator<Item = &'a AccessRequest>,
    {
        for request in requests {
            let decision = self.evaluate(request);
            if decision.is_blocked() {
                return decision;
            }
        }
        AccessDecision::allow()
    }
}

impl Default for AccessEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_fixed() {
        let engine = AccessEngine::builtin();
        assert_eq!(
            engine.stage_names(),
            vec!["exclude", "directory-block", "always-block", "content-scan"]
        );
    }

    #[test]
    fn test_no_stage_matches_allows() {
        let engine = AccessEngine::builtin();
        let d = engine.check("/project/main.go", Operation::Read, None);
        assert!(d.allowed);
        assert_eq!(d.tier, None);
    }

    #[test]
    fn test_empty_pipeline_allows_everything() {
        let engine = AccessEngine::with_stages(Vec::new());
        assert!(engine.check("id_rsa", Operation::Read, None).allowed);
    }

    #[test]
    fn test_directory_reason_names_fragment() {
        let engine = AccessEngine::builtin();
        let d = engine.check("/home/user/.ssh/config", Operation::Read, None);
        assert!(d.is_blocked());
        assert_eq!(d.reason, "sensitive directory: .ssh/");
    }

    #[test]
    fn test_always_block_reason_names_category() {
        let engine = AccessEngine::builtin();
        let d = engine.check("/path/to/server.pem", Operation::Read, None);
        assert!(d.is_blocked());
        assert!(d.reason.starts_with("always-block pattern: certs"));
    }
}
