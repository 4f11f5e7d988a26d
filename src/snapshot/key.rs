use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in file names.
pub const KEY_LEN: usize = 16;

/// `cwd` without trailing separators; the root directory keeps its single
/// `/`.
pub fn canonical_dir(cwd: &str) -> &str {
    let trimmed = cwd.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() && !cwd.is_empty() {
        &cwd[..1]
    } else {
        trimmed
    }
}

/// Stable per-directory key.
///
/// Trailing separators are ignored so `/a/b` and `/a/b/` share a key.
pub fn working_dir_key(cwd: &str) -> String {
    let hash = Sha256::digest(canonical_dir(cwd).as_bytes());
    let mut hex = format!("{:x}", hash);
    hex.truncate(KEY_LEN);
    hex
}
