//! Append-only line writer with size-based rotation.
//!
//! When the active file grows past the size limit it is shifted to
//! `<name>.1`, older backups move up one slot (`.1` to `.2`, ...), and the
//! oldest beyond the retention count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_BACKUP_FILES: usize = 3;

pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            backups,
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("mutex poisoned: {e}")))?;

        if fs::metadata(&self.file_path).is_ok_and(|meta| meta.len() > self.max_bytes) {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }
        let Some(handle) = file.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };

        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.file_path);
        }

        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.file_path, self.backup_path(1))
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}
