use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory lock on a board directory.
///
/// Held by the CLI for the whole load-mutate-save of a write command and by
/// the TUI around each reload-then-save, so the two never interleave writes.
/// Uses `flock` on Unix; released on drop.
pub struct BoardLock {
    _file: File,
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not lock {path}: another storyboard process is writing")]
    Timeout { path: PathBuf },
}

impl BoardLock {
    /// Block up to `timeout` waiting for the lock.
    pub fn acquire(board_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = board_dir.join(".lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| LockError::CreateError {
                path: lock_path.clone(),
                source,
            })?;

        let start = Instant::now();
        while try_lock(&file).is_err() {
            if start.elapsed() >= timeout {
                return Err(LockError::Timeout { path: lock_path });
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        Ok(BoardLock {
            _file: file,
            path: lock_path,
        })
    }

    /// Acquire with the default 5 second timeout
    pub fn acquire_default(board_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(board_dir, Duration::from_secs(5))
    }
}

impl Drop for BoardLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}
