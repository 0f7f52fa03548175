//! Single-writer guard for commands that change the content root or catalog.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(300);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(250);

/// Holds `<data_dir>/write.lock`; the file is removed on drop.
#[derive(Debug)]
pub struct WriteLockGuard {
    path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Wait for the write lock, clearing it if the recorded pid is gone.
pub async fn acquire(lock_path: &Path) -> anyhow::Result<WriteLockGuard> {
    let started = std::time::Instant::now();

    loop {
        match try_acquire(lock_path) {
            Ok(guard) => return Ok(guard),
            Err(LockState::Stale) => {
                tracing::warn!(path = %lock_path.display(), "removing stale write lock");
                let _ = std::fs::remove_file(lock_path);
            }
            Err(state) => {
                if started.elapsed() >= LOCK_WAIT_TIMEOUT {
                    match state {
                        LockState::HeldBy(pid) => anyhow::bail!(
                            "another import or scan is running (pid {pid}); try again after it finishes"
                        ),
                        _ => anyhow::bail!(
                            "could not acquire write lock at {}; remove it if no syl process is running",
                            lock_path.display()
                        ),
                    }
                }
                tokio::time::sleep(LOCK_RETRY_DELAY).await;
            }
        }
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(u32),
    Stale,
    Unknown,
}

fn try_acquire(lock_path: &Path) -> Result<WriteLockGuard, LockState> {
    if let Some(parent) = lock_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", std::process::id());
            Ok(WriteLockGuard {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut contents = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut contents))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            match contents.trim().parse::<u32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(_) => Err(LockState::Stale),
                None => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn is_process_running(pid: u32) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .is_ok_and(|status| status.success())
}
