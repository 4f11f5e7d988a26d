use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{HookGuardError, Result};

use super::{EditHistory, EditRecord};
use crate::snapshot::canonical_dir;

/// Append-only JSONL edit log.
///
/// Readers are lenient: other tools write to the same file, so lines with a
/// missing field or an unparseable timestamp are skipped rather than failing
/// the whole read.
#[derive(Debug, Clone)]
pub struct EditLog {
    path: PathBuf,
}

/// What a reader needs from a line; everything else is ignored.
#[derive(Debug, Deserialize)]
struct LogLine {
    timestamp: Option<String>,
    file: Option<String>,
    #[serde(default)]
    cwd: Option<String>,
}

/// One usable line of the log.
struct LoggedEdit {
    timestamp: DateTime<Utc>,
    file: String,
    cwd: Option<String>,
}

impl EditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record, creating parent dirs if needed.
    pub fn append(&self, record: &EditRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let json = serde_json::to_string(record)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }

    /// Every readable entry in log order.
    fn read_entries(&self) -> Result<Vec<LoggedEdit>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| HookGuardError::Storage {
                reason: format!("{}: {}", self.path.display(), e),
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let parsed = match serde_json::from_str::<LogLine>(trimmed) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(
                        "skipping malformed line {} in {}: {}",
                        line_num + 1,
                        self.path.display(),
                        e
                    );
                    continue;
                }
            };
            let (Some(ts), Some(file)) = (parsed.timestamp, parsed.file) else {
                continue;
            };
            match parse_timestamp(&ts) {
                Some(timestamp) => entries.push(LoggedEdit {
                    timestamp,
                    file,
                    cwd: parsed.cwd.filter(|c| !c.is_empty()),
                }),
                None => tracing::debug!("skipping line {} with timestamp {ts:?}", line_num + 1),
            }
        }

        Ok(entries)
    }
}

impl EditHistory for EditLog {
    fn recent_files(
        &self,
        cwd: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        // A window reaching past the representable range covers everything.
        let cutoff = now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let wanted = (!cwd.is_empty()).then(|| canonical_dir(cwd));
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for edit in self.read_entries()? {
            if edit.timestamp < cutoff {
                continue;
            }
            if let (Some(wanted), Some(dir)) = (wanted, edit.cwd.as_deref()) {
                if canonical_dir(dir) != wanted {
                    continue;
                }
            }
            if seen.insert(edit.file.clone()) {
                files.push(edit.file);
            }
        }
        Ok(files)
    }
}

/// RFC 3339, or a zone-less ISO 8601 stamp taken as local time.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn log_in(tmp: &TempDir) -> EditLog {
        EditLog::new(tmp.path().join("logs").join("edits.jsonl"))
    }

    #[test]
    fn test_missing_log_is_empty() {
        let tmp = TempDir::new().unwrap();
        let files = log_in(&tmp)
            .recent_files("", Duration::minutes(60), Utc::now())
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_append_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let log = log_in(&tmp);
        log.append(&EditRecord::new("/p/a.rs", "Edit", "s1")).unwrap();
        assert!(log.path().exists());
    }

    #[test]
    fn test_window_and_dedup() {
        let tmp = TempDir::new().unwrap();
        let log = log_in(&tmp);
        let now = Utc::now();
        log.append(&EditRecord::new("/p/old.rs", "Edit", "s").at(now - Duration::minutes(90)))
            .unwrap();
        log.append(&EditRecord::new("/p/a.rs", "Edit", "s").at(now - Duration::minutes(30)))
            .unwrap();
        log.append(&EditRecord::new("/p/b.rs", "Write", "s").at(now - Duration::minutes(20)))
            .unwrap();
        log.append(&EditRecord::new("/p/a.rs", "Edit", "s").at(now - Duration::minutes(10)))
            .unwrap();

        let files = log.recent_files("", Duration::minutes(60), now).unwrap();
        assert_eq!(files, vec!["/p/a.rs", "/p/b.rs"]);
    }

    #[test]
    fn test_malformed_and_foreign_lines_skipped() {
        let tmp = TempDir::new().unwrap();
        let log = log_in(&tmp);
        let now = Utc::now();
        log.append(&EditRecord::new("/p/a.rs", "Edit", "s").at(now)).unwrap();

        let mut f = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(f, "not json").unwrap();
        writeln!(f, r#"{{"timestamp":"yesterday","file":"/p/bad.rs"}}"#).unwrap();
        writeln!(f, r#"{{"file":"/p/no_ts.rs"}}"#).unwrap();
        drop(f);

        let files = log.recent_files("", Duration::minutes(60), now).unwrap();
        assert_eq!(files, vec!["/p/a.rs"]);
    }

    #[test]
    fn test_edits_from_other_directories_are_left_out() {
        let tmp = TempDir::new().unwrap();
        let log = log_in(&tmp);
        let now = Utc::now();
        log.append(&EditRecord::new("/a/x.rs", "Edit", "s").with_cwd("/a/").at(now))
            .unwrap();
        log.append(&EditRecord::new("/b/y.rs", "Edit", "s").with_cwd("/b").at(now))
            .unwrap();
        log.append(&EditRecord::new("/shared/z.rs", "Edit", "s").at(now))
            .unwrap();

        let files = log.recent_files("/a", Duration::minutes(60), now).unwrap();
        assert_eq!(files, vec!["/a/x.rs", "/shared/z.rs"]);
        let all = log.recent_files("", Duration::minutes(60), now).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_window_past_time_range_keeps_everything() {
        let tmp = TempDir::new().unwrap();
        let log = log_in(&tmp);
        let now = Utc::now();
        log.append(&EditRecord::new("/p/old.rs", "Edit", "s").at(now - Duration::days(3650)))
            .unwrap();

        let window = Duration::try_days(100_000_000).unwrap();
        let files = log.recent_files("", window, now).unwrap();
        assert_eq!(files, vec!["/p/old.rs"]);
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert!(parse_timestamp("2026-03-01T10:00:00Z").is_some());
        assert!(parse_timestamp("2026-03-01T10:00:00+08:00").is_some());
        assert!(parse_timestamp("2026-03-01T10:00:00.123456").is_some());
        assert!(parse_timestamp("10:00").is_none());
    }
}
