pub mod policy;
pub mod snapshot;

pub use policy::*;
pub use snapshot::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HookGuardError, Result};

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "HOOKGUARD_CONFIG";

/// Top-level configuration from `~/.config/hookguard/config.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub snapshot: SnapshotConfig,

    #[serde(default)]
    pub edits: EditsConfig,

    #[serde(default)]
    pub git: GitConfig,
}

impl GuardConfig {
    /// Load config from a YAML file. Returns default if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents).map_err(|e| HookGuardError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load from `$HOOKGUARD_CONFIG`, else the global config file.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }
}

/// The config file location honoring `$HOOKGUARD_CONFIG`.
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_global().join("config.yml"))
}

/// Returns the global config directory path: `~/.config/hookguard/`
pub fn dirs_global() -> PathBuf {
    home_dir().join(".config").join("hookguard")
}

pub(crate) fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = GuardConfig::load_from(&tmp.path().join("nope.yml")).unwrap();
        assert_eq!(config.scan.max_scan_size, DEFAULT_MAX_SCAN_SIZE);
        assert_eq!(config.snapshot.max_turns, 6);
        assert_eq!(config.snapshot.max_age_hours, 24);
        assert_eq!(config.edits.window_minutes, 60);
        assert!(config.git.enabled);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yml");
        std::fs::write(
            &path,
            "scan:\n  max_scan_size: 2048\ncatalog:\n  extra_always_block:\n    - \"*.vault\"\n",
        )
        .unwrap();

        let config = GuardConfig::load_from(&path).unwrap();
        assert_eq!(config.scan.max_scan_size, 2048);
        assert_eq!(config.catalog.extra_always_block, vec!["*.vault"]);
        assert_eq!(config.snapshot.max_total_len, 20000);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yml");
        std::fs::write(&path, "scan: [not, a, map").unwrap();

        let err = GuardConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, HookGuardError::ConfigParse { .. }));
    }
}
