use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::error::Result;
use crate::scanner::ContentScanner;

/// What a scan run covers.
enum Target {
    Staged(Vec<PathBuf>),
    Dir(PathBuf),
    File(PathBuf),
}

/// Files in the git index, relative to the repository root.
///
/// `None` when git fails, e.g. outside a repository.
fn staged_files() -> Result<Option<Vec<PathBuf>>> {
    let output = std::process::Command::new("git")
        .args(["diff", "--cached", "--name-only"])
        .output()?;
    if !output.status.success() {
        tracing::debug!("git diff --cached exited with {}", output.status);
        return Ok(None);
    }
    Ok(Some(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|l| !l.is_empty())
            .map(PathBuf::from)
            .collect(),
    ))
}

fn resolve_target(staged: bool, path: Option<&str>) -> Result<Option<Target>> {
    if staged {
        return Ok(staged_files()?.map(Target::Staged));
    }
    let path = PathBuf::from(path.unwrap_or("."));
    Ok(if path.is_dir() {
        Some(Target::Dir(path))
    } else if path.is_file() {
        Some(Target::File(path))
    } else {
        eprintln!("hookguard: path not found: {}", path.display());
        None
    })
}

/// `hookguard scan`: report lines that look like credentials.
///
/// Exit status is 1 when anything is found, so the command can gate a
/// pre-commit hook.
pub async fn run(staged: bool, path: Option<&str>) -> Result<ExitCode> {
    let config = super::load_config();
    let scanner = ContentScanner::builtin()
        .as_ref()
        .clone()
        .with_max_scan_size(config.scan.max_scan_size);

    let Some(target) = resolve_target(staged, path)? else {
        if staged {
            eprintln!("hookguard: failed to get staged files (not a git repo?)");
        }
        return Ok(ExitCode::FAILURE);
    };

    let findings = match target {
        Target::Staged(files) if files.is_empty() => {
            eprintln!("hookguard: no staged files to scan.");
            return Ok(ExitCode::SUCCESS);
        }
        Target::Staged(files) => {
            eprintln!("hookguard: scanning {} staged file(s)...", files.len());
            files.iter().map(|f| scan_file(&scanner, f)).sum()
        }
        Target::Dir(dir) => {
            eprintln!("hookguard: scanning directory {}...", dir.display());
            scan_dir(&scanner, &dir)?
        }
        Target::File(file) => {
            eprintln!("hookguard: scanning file {}...", file.display());
            scan_file(&scanner, &file)
        }
    };

    if findings == 0 {
        eprintln!("hookguard: scan clean -- no secrets detected.");
        return Ok(ExitCode::SUCCESS);
    }
    eprintln!("\nhookguard: {findings} potential secret(s) found.");
    Ok(ExitCode::FAILURE)
}

/// Scan a single file for secrets. Returns the number of findings.
fn scan_file(scanner: &ContentScanner, path: &Path) -> usize {
    let contents = match scanner.read_for_scan(path) {
        Ok(c) => c,
        // Binary, unreadable or oversized files are skipped.
        Err(e) => {
            tracing::debug!("skipping: {e}");
            return 0;
        }
    };

    let findings = scanner.scan_lines(path, &contents);
    for finding in &findings {
        println!(
            "{}:{}: {}",
            finding.file.display(),
            finding.line,
            finding.description
        );
    }
    findings.len()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

/// Walk `dir` depth-first in name order, skipping hidden directories.
fn scan_dir(scanner: &ContentScanner, dir: &Path) -> Result<usize> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    let mut total = 0;
    for path in entries {
        if path.is_dir() {
            if !is_hidden(&path) {
                total += scan_dir(scanner, &path)?;
            }
        } else if path.is_file() {
            total += scan_file(scanner, &path);
        }
    }
    Ok(total)
}
