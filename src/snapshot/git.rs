use std::path::Path;
use std::process::Command;

/// Supplies a short working-tree summary for a snapshot.
///
/// Failures are not errors: a provider that cannot answer returns "".
pub trait GitStatusProvider: Send + Sync {
    fn status(&self, cwd: &Path) -> String;
}

/// Runs `git status -s` in the working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitStatusProvider for GitCli {
    fn status(&self, cwd: &Path) -> String {
        if cwd.as_os_str().is_empty() {
            return String::new();
        }
        match Command::new("git").args(["status", "-s"]).current_dir(cwd).output() {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
            Ok(out) => {
                tracing::debug!("git status exited with {}", out.status);
                String::new()
            }
            Err(e) => {
                tracing::debug!("git status failed: {e}");
                String::new()
            }
        }
    }
}

/// Never reports anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGit;

impl GitStatusProvider for NoGit {
    fn status(&self, _cwd: &Path) -> String {
        String::new()
    }
}
