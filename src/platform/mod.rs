//! Platform abstraction for the hosts file and the process table.

use std::path::PathBuf;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

#[cfg(unix)]
pub use unix::{bulk_kill_command, is_superuser, HOSTS_PATH};

#[cfg(windows)]
pub use windows::{bulk_kill_command, is_superuser, HOSTS_PATH};

use anyhow::{Context, Result};
use std::path::Path;

/// Trait for hosts file access.
pub trait HostsEditor: Send + Sync {
    /// Path being edited (for messages).
    fn path(&self) -> &Path;
    /// Read the whole file. Invalid UTF-8 is replaced, not rejected.
    fn read(&self) -> Result<String>;
    /// Replace the whole file content.
    fn write(&self, content: &str) -> Result<()>;
}

/// One running process as seen by a [`ProcessTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
}

/// Why a single process could not be terminated.
#[derive(Debug, thiserror::Error)]
pub enum TerminateError {
    #[error("process {0} no longer exists")]
    NoSuchProcess(u32),
    #[error("access denied terminating process {0}")]
    AccessDenied(u32),
}

/// Trait for per-process enumeration and termination.
pub trait ProcessTable {
    /// Snapshot of running processes.
    fn processes(&self) -> Vec<ProcessEntry>;
    /// Ask the process to terminate.
    fn terminate(&self, pid: u32) -> std::result::Result<(), TerminateError>;
}

/// HostsEditor for the platform file, or BLOQUEO_HOSTS_FILE / config override.
pub fn default_hosts_editor(path: impl Into<PathBuf>) -> Box<dyn HostsEditor> {
    Box::new(FileHostsEditor::new(path))
}

/// HostsEditor that reads/writes a file at the given path.
#[derive(Clone)]
pub struct FileHostsEditor {
    path: PathBuf,
}

impl FileHostsEditor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HostsEditor for FileHostsEditor {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write(&self, content: &str) -> Result<()> {
        // Truncate in place so the file keeps its owner and mode.
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .open(&self.path)
            .with_context(|| format!("open {} for writing", self.path.display()))?;
        fs2::FileExt::lock_exclusive(&file)
            .with_context(|| format!("lock {}", self.path.display()))?;
        file.set_len(0)
            .with_context(|| format!("truncate {}", self.path.display()))?;
        use std::io::Write;
        file.write_all(content.as_bytes())
            .with_context(|| format!("write {}", self.path.display()))?;
        file.flush()
            .with_context(|| format!("flush {}", self.path.display()))?;
        Ok(())
    }
}
