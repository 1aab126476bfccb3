//! File naming for a container: the payload plus its companion records.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const PAYLOAD_EXTENSION: &str = "huff";
const GLOBAL_SUFFIX: &str = ".global.json";
const INDEX_SUFFIX: &str = ".chunks.json";
const CODES_SUFFIX: &str = ".codes.txt";

/// Append `.huff` unless the name already ends with it.
pub fn ensure_huff_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == PAYLOAD_EXTENSION) {
        return path.to_path_buf();
    }
    with_suffix(path, ".huff")
}

/// Default destination for decompressing `huff`: `uncompressed_<name>.txt`
/// beside the container, `<name>` being the container name without `.huff`.
pub fn default_output_path(huff: &Path) -> PathBuf {
    let payload = ensure_huff_extension(huff);
    let stem = payload.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = format!("uncompressed_{stem}.txt");
    match payload.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Every file belonging to one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPaths {
    pub payload: PathBuf,
    pub global: PathBuf,
    pub index: PathBuf,
    pub codes: PathBuf,
}

impl ContainerPaths {
    /// Paths for the container at `path`; `.huff` is appended when missing.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let payload = ensure_huff_extension(path.as_ref());
        Self {
            global: with_suffix(&payload, GLOBAL_SUFFIX),
            index: with_suffix(&payload, INDEX_SUFFIX),
            codes: with_suffix(&payload, CODES_SUFFIX),
            payload,
        }
    }

    /// Directory the files live in. Staged temp files go here too, keeping
    /// every rename on one filesystem.
    pub fn dir(&self) -> &Path {
        match self.payload.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Files that must all exist for the container to be readable.
    pub fn required(&self) -> [&Path; 3] {
        [&self.payload, &self.index, &self.global]
    }
}
