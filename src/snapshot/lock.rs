use std::fs;
use std::path::Path;

use crate::error::Result;

/// Advisory file lock using flock(2) on a .lock file next to `path`.
///
/// The empty `.lock` file stays behind, one per working directory. It is
/// never unlinked: a waiter blocked on the old inode and a newcomer creating
/// a fresh one would both hold "the" lock.
pub(crate) struct FileLock {
    _file: fs::File,
}

impl FileLock {
    pub(crate) fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        flock_exclusive(&file)?;
        Ok(Self { _file: file })
    }
}

// When FileLock is dropped, the file is closed and the lock is released.

#[cfg(unix)]
fn flock_exclusive(file: &fs::File) -> Result<()> {
    use std::os::unix::io::AsRawFd;
    let fd = file.as_raw_fd();
    let ret = unsafe { libc::flock(fd, libc::LOCK_EX) };
    if ret != 0 {
        return Err(crate::error::HookGuardError::Io(
            std::io::Error::last_os_error(),
        ));
    }
    Ok(())
}

#[cfg(not(unix))]
fn flock_exclusive(_file: &fs::File) -> Result<()> {
    // No-op on non-Unix platforms
    Ok(())
}
