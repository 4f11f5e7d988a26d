pub mod rules;
pub mod signatures;

use std::sync::{Arc, LazyLock};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::decision::PatternTier;
use crate::error::{HookGuardError, Result};

/// Category assigned to patterns that come from user configuration.
pub const USER_CATEGORY: &str = "user";

/// One path classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRule {
    /// A basename glob, a path-suffix glob (contains `/`), or a directory
    /// fragment for `DirectoryBlock`.
    pub pattern: String,
    pub tier: PatternTier,
    /// Grouping used in diagnostics (ssh_keys, certs, cicd, ...).
    pub category: String,
}

impl MatchRule {
    pub fn new(pattern: impl Into<String>, tier: PatternTier, category: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            tier,
            category: category.into(),
        }
    }
}

/// A credential signature: a compiled regex plus what it detects.
#[derive(Debug, Clone)]
pub struct ContentSignature {
    pub regex: Regex,
    pub description: String,
}

impl ContentSignature {
    pub fn new(pattern: &str, description: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| HookGuardError::InvalidSignature {
            reason: format!("{pattern}: {e}"),
        })?;
        Ok(Self {
            regex,
            description: description.into(),
        })
    }
}

/// The built-in rule set, in tier order and then table order.
pub fn default_rules() -> Vec<MatchRule> {
    let mut out = Vec::new();
    for pattern in rules::EXCLUDE {
        out.push(MatchRule::new(*pattern, PatternTier::Exclude, "exclusions"));
    }
    for pattern in rules::DIRECTORY_BLOCK {
        out.push(MatchRule::new(
            *pattern,
            PatternTier::DirectoryBlock,
            "directories",
        ));
    }
    for (category, patterns) in rules::ALWAYS_BLOCK {
        for pattern in *patterns {
            out.push(MatchRule::new(*pattern, PatternTier::AlwaysBlock, *category));
        }
    }
    for (category, patterns) in rules::CONTENT_SCAN {
        for pattern in *patterns {
            out.push(MatchRule::new(*pattern, PatternTier::ContentScan, *category));
        }
    }
    out
}

/// The built-in signatures, compiled.
pub fn default_signatures() -> Result<Vec<ContentSignature>> {
    signatures::SIGNATURES
        .iter()
        .map(|(pattern, description)| ContentSignature::new(pattern, *description))
        .collect()
}

static BUILTIN: LazyLock<Arc<PatternCatalog>> = LazyLock::new(|| {
    Arc::new(PatternCatalog::compile(default_rules()).expect("built-in path patterns should compile"))
});

/// Immutable, compiled classification tables.
///
/// Built once and shared read-only; engines take it by reference so tests
/// and policy variants can supply their own.
pub struct PatternCatalog {
    rules: Vec<MatchRule>,
    exclude: TierMatcher,
    always_block: TierMatcher,
    content_scan: TierMatcher,
    /// Indexes into `rules` of the directory fragments, in table order.
    directories: Vec<usize>,
}

// GlobSet doesn't implement Debug.
impl std::fmt::Debug for PatternCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCatalog")
            .field("rules", &self.rules.len())
            .field("exclude", &"<GlobSet>")
            .field("always_block", &"<GlobSet>")
            .field("content_scan", &"<GlobSet>")
            .field("directories", &self.directories.len())
            .finish()
    }
}

impl PatternCatalog {
    /// The shared built-in catalog.
    pub fn builtin() -> Arc<PatternCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Built-in rules plus any user-configured patterns.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let mut all = default_rules();
        let extras = [
            (&config.extra_exclude, PatternTier::Exclude),
            (&config.extra_directory_block, PatternTier::DirectoryBlock),
            (&config.extra_always_block, PatternTier::AlwaysBlock),
            (&config.extra_content_scan, PatternTier::ContentScan),
        ];
        for (patterns, tier) in extras {
            all.extend(
                patterns
                    .iter()
                    .map(|p| MatchRule::new(p.as_str(), tier, USER_CATEGORY)),
            );
        }
        Self::compile(all)
    }

    /// Compile a rule list into matchers.
    pub fn compile(rules: Vec<MatchRule>) -> Result<Self> {
        let exclude = TierMatcher::build(&rules, PatternTier::Exclude)?;
        let always_block = TierMatcher::build(&rules, PatternTier::AlwaysBlock)?;
        let content_scan = TierMatcher::build(&rules, PatternTier::ContentScan)?;
        let directories = rules
            .iter()
            .enumerate()
            .filter(|(_, r)| r.tier == PatternTier::DirectoryBlock)
            .map(|(i, _)| i)
            .collect();

        Ok(Self {
            rules,
            exclude,
            always_block,
            content_scan,
            directories,
        })
    }

    pub fn rules(&self) -> &[MatchRule] {
        &self.rules
    }

    pub fn rules_for(&self, tier: PatternTier) -> impl Iterator<Item = &MatchRule> {
        self.rules.iter().filter(move |r| r.tier == tier)
    }

    /// Exclusions only ever look at the basename.
    pub fn match_exclude(&self, path: &str) -> Option<&MatchRule> {
        let normalized = normalize(path);
        self.exclude
            .basename
            .matches(basename(&normalized))
            .first()
            .map(|&i| &self.rules[self.exclude.basename_rules[i]])
    }

    /// First directory fragment contained in the path.
    pub fn match_directory(&self, path: &str) -> Option<&MatchRule> {
        let normalized = normalize(path);
        self.directories
            .iter()
            .map(|&i| &self.rules[i])
            .find(|rule| contains_directory(&normalized, &rule.pattern))
    }

    pub fn match_always_block(&self, path: &str) -> Option<&MatchRule> {
        self.always_block.first_match(&self.rules, path)
    }

    pub fn match_content_scan(&self, path: &str) -> Option<&MatchRule> {
        self.content_scan.first_match(&self.rules, path)
    }
}

/// Compiled globs for one tier, split by how they are applied.
struct TierMatcher {
    basename: GlobSet,
    basename_rules: Vec<usize>,
    path: GlobSet,
    path_rules: Vec<usize>,
}

impl TierMatcher {
    fn build(rules: &[MatchRule], tier: PatternTier) -> Result<Self> {
        let mut basename = GlobSetBuilder::new();
        let mut basename_rules = Vec::new();
        let mut path = GlobSetBuilder::new();
        let mut path_rules = Vec::new();

        for (i, rule) in rules.iter().enumerate().filter(|(_, r)| r.tier == tier) {
            if rule.pattern.contains('/') {
                let suffix = format!("**/{}", rule.pattern.trim_start_matches('/'));
                path.add(build_glob(&suffix, &rule.pattern)?);
                path_rules.push(i);
            } else {
                basename.add(build_glob(&rule.pattern, &rule.pattern)?);
                basename_rules.push(i);
            }
        }

        Ok(Self {
            basename: finish(basename)?,
            basename_rules,
            path: finish(path)?,
            path_rules,
        })
    }

    /// Basename globs first, then path-suffix globs; lowest index wins within each.
    fn first_match<'a>(&self, rules: &'a [MatchRule], path: &str) -> Option<&'a MatchRule> {
        let normalized = normalize(path);
        if let Some(&i) = self.basename.matches(basename(&normalized)).first() {
            return Some(&rules[self.basename_rules[i]]);
        }
        self.path
            .matches(normalized.as_str())
            .first()
            .map(|&i| &rules[self.path_rules[i]])
    }
}

fn build_glob(glob: &str, original: &str) -> Result<globset::Glob> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .map_err(|e| HookGuardError::GlobPattern {
            pattern: original.to_string(),
            reason: e.to_string(),
        })
}

fn finish(builder: GlobSetBuilder) -> Result<GlobSet> {
    builder.build().map_err(|e| HookGuardError::GlobPattern {
        pattern: String::new(),
        reason: e.to_string(),
    })
}

/// Forward slashes only, so Windows-style paths hit the same rules.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Last non-empty component of a normalized path.
pub fn basename(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

fn contains_directory(path: &str, fragment: &str) -> bool {
    let name = fragment.trim_matches('/');
    if name.is_empty() {
        return false;
    }
    path.contains(&format!("/{name}/")) || path.starts_with(&format!("{name}/"))
}
