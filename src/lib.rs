//! Sensitive-file access control and resumable session snapshots for AI
//! coding assistant hooks.
//!
//! Two cores sit behind thin hook entry points:
//!
//! - [`engine::AccessEngine`] classifies a file access through four tiers
//!   (exclude, directory block, always block, content scan) using the
//!   [`catalog::PatternCatalog`] and [`scanner::ContentScanner`].
//! - [`snapshot::SnapshotStore`] saves the tail of a session transcript per
//!   working directory and hands it back exactly once.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod hook;
pub mod scanner;
pub mod snapshot;
pub mod storage;
pub mod transcript;

pub use decision::{AccessDecision, AccessRequest, Operation, PatternTier};
pub use engine::AccessEngine;
pub use error::{HookGuardError, Result};
pub use snapshot::{GenerateRequest, SnapshotStore};
