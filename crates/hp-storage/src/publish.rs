//! Atomic publication of container files.
//!
//! Each file is staged in a temp file beside its destination, synced, then
//! renamed into place. A file already at a destination is first moved aside
//! ("retired") into a temp path in the same directory.
//!
//! A [`Publication`] remembers what it has placed and retired. Dropping it
//! without [`Publication::commit`] removes the new files and moves the
//! retired ones back; committing deletes the retired copies.

use hp_core::Result;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, warn};

fn parent_dir(path: &Path) -> &Path {
    path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."))
}

/// Create a temp file in `dir`, ready to receive a staged file.
pub fn stage_in(dir: &Path) -> Result<NamedTempFile> {
    fs::create_dir_all(dir)?;
    Ok(NamedTempFile::new_in(dir)?)
}

/// Buffered writer over a staged temp file.
pub fn staged_writer(dir: &Path) -> Result<BufWriter<NamedTempFile>> {
    Ok(BufWriter::with_capacity(1 << 16, stage_in(dir)?))
}

/// Flush a buffered staged writer and get the temp file back.
pub fn finish_staged(writer: BufWriter<NamedTempFile>) -> Result<NamedTempFile> {
    writer.into_inner().map_err(|e| e.into_error().into())
}

/// A previous file moved out of the way, restorable until commit.
#[derive(Debug)]
struct Retired {
    original: PathBuf,
    backup: TempPath,
}

#[derive(Debug, Default)]
pub struct Publication {
    placed: Vec<PathBuf>,
    retired: Vec<Retired>,
    committed: bool,
}

impl Publication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move an existing file at `path` aside. Missing paths and
    /// non-files are left alone.
    pub fn retire(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() || self.retired.iter().any(|r| r.original == path) {
            return Ok(());
        }
        let backup = tempfile::Builder::new()
            .prefix(".retired")
            .tempfile_in(parent_dir(path))?
            .into_temp_path();
        fs::rename(path, &backup)?;
        debug!(path = %path.display(), "retired");
        self.retired.push(Retired { original: path.to_path_buf(), backup });
        Ok(())
    }

    /// Sync a staged file and rename it to `dest`, retiring whatever was there.
    pub fn place(&mut self, staged: NamedTempFile, dest: &Path) -> Result<()> {
        staged.as_file().sync_all()?;
        self.retire(dest)?;
        staged.persist(dest).map_err(|e| e.error)?;
        debug!(path = %dest.display(), "published");
        self.placed.push(dest.to_path_buf());
        Ok(())
    }

    /// Stage `bytes` beside `dest` and place it.
    pub fn place_bytes(&mut self, bytes: &[u8], dest: &Path) -> Result<()> {
        let mut staged = stage_in(parent_dir(dest))?;
        staged.write_all(bytes)?;
        staged.flush()?;
        self.place(staged, dest)
    }

    pub fn placed(&self) -> &[PathBuf] {
        &self.placed
    }

    /// Paths whose previous contents are held aside.
    pub fn retired(&self) -> impl Iterator<Item = &Path> {
        self.retired.iter().map(|r| r.original.as_path())
    }

    /// Keep everything placed so far and drop the retired copies.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for Publication {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for path in self.placed.iter().rev() {
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "could not roll back published file");
            }
        }
        for Retired { original, backup } in self.retired.drain(..).rev() {
            match backup.persist(&original) {
                Ok(()) => debug!(path = %original.display(), "restored"),
                Err(e) => warn!(path = %original.display(), error = %e.error, "could not restore retired file"),
            }
        }
    }
}
