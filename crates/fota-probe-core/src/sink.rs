//! Output file lifecycle for the fetch operations.
//!
//! Both fetches write the same configured file. Any existing file is removed
//! before the new one is created, and a failed fetch removes what it wrote.
//! A process-wide lock keeps two fetches from writing the file at once.

use crate::error::{ProbeError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static SINK_LOCK: Mutex<()> = Mutex::new(());

/// Holds the output lock for the duration of one fetch.
pub fn lock() -> MutexGuard<'static, ()> {
    // A panicked fetch leaves nothing behind that the next one depends on.
    SINK_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Freshly created download sink.
#[derive(Debug)]
pub struct OutputSink {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl OutputSink {
    /// Deletes `path` if it exists and creates it empty. The parent directory
    /// is not created.
    pub fn replace(path: &Path) -> Result<Self> {
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!("removed previous {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(ProbeError::io(path, e)),
        }
        let file = File::create(path).map_err(|e| ProbeError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Flushes and syncs; returns the number of bytes written. On failure the
    /// file is removed.
    pub fn finish(mut self) -> Result<u64> {
        let synced = self
            .writer
            .flush()
            .and_then(|()| self.writer.get_ref().sync_all());
        match synced {
            Ok(()) => Ok(self.written),
            Err(e) => {
                let path = self.path.clone();
                self.discard();
                Err(ProbeError::io(path, e))
            }
        }
    }

    /// Closes and removes the file.
    pub fn discard(self) {
        let path = self.path;
        drop(self.writer);
        remove_artifact(&path);
    }
}

/// Removes a partial or unverifiable artifact; a missing file is fine.
pub fn remove_artifact(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!("could not remove partial {}: {}", path.display(), e);
        }
    }
}
