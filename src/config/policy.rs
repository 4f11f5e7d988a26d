use serde::{Deserialize, Serialize};

/// Default cap on how much of a file the content scanner will read: 1 MiB.
pub const DEFAULT_MAX_SCAN_SIZE: u64 = 1024 * 1024;

/// User patterns appended to the built-in catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub extra_exclude: Vec<String>,
    #[serde(default)]
    pub extra_directory_block: Vec<String>,
    #[serde(default)]
    pub extra_always_block: Vec<String>,
    #[serde(default)]
    pub extra_content_scan: Vec<String>,
}

/// Content scanner limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Files larger than this are not read; ContentScan-tier access fails open.
    #[serde(default = "default_max_scan_size")]
    pub max_scan_size: u64,
}

fn default_max_scan_size() -> u64 {
    DEFAULT_MAX_SCAN_SIZE
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_scan_size: DEFAULT_MAX_SCAN_SIZE,
        }
    }
}
