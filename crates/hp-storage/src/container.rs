//! Container files on disk: `<name>.huff` holds the payload,
//! `<name>.huff.chunks.json` the chunk index and `<name>.huff.global.json`
//! the global frequency record.
//!
//! The global record is withdrawn first and published last; a reader that
//! finds it can rely on the other two files belonging to it.

use hp_core::{ChunkIndex, Container, ContainerMetadata, GlobalMetadata, HpError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

use crate::paths::ContainerPaths;
use crate::publish::Publication;

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => HpError::MetadataMissing { path: path.display().to_string() },
        _ => HpError::Io(e),
    })?;
    serde_json::from_str(&text).map_err(|e| HpError::corrupt(format!("{}: {e}", path.display())))
}

pub(crate) fn record_bytes<T: Serialize>(record: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(record)?)
}

/// Load both records and check them against the payload file's length.
pub fn read_metadata(paths: &ContainerPaths) -> Result<ContainerMetadata> {
    let global: GlobalMetadata = read_record(&paths.global)?;
    let index: ChunkIndex = read_record(&paths.index)?;
    let payload_len = fs::metadata(&paths.payload)?.len();
    let metadata = ContainerMetadata::new(global, index);
    metadata.validate(payload_len)?;
    Ok(metadata)
}

/// Publish an in-memory container at `path` (`.huff` appended if missing).
pub fn write_container(container: &Container, path: impl AsRef<Path>) -> Result<ContainerPaths> {
    let paths = ContainerPaths::new(path);
    let metadata = container.metadata();
    let index = record_bytes(&metadata.index)?;
    let global = record_bytes(&metadata.global)?;

    let mut publication = Publication::new();
    publication.retire(&paths.global)?;
    publication.place_bytes(container.payload(), &paths.payload)?;
    publication.place_bytes(&index, &paths.index)?;
    publication.place_bytes(&global, &paths.global)?;
    publication.commit();

    info!(
        path = %paths.payload.display(),
        chunks = metadata.index.total_chunks,
        payload_bytes = container.payload().len(),
        "container written"
    );
    Ok(paths)
}

/// Load a whole container into memory.
pub fn read_container(path: impl AsRef<Path>) -> Result<Container> {
    let paths = ContainerPaths::new(path);
    let metadata = read_metadata(&paths)?;
    let payload = fs::read(&paths.payload)?;
    Container::new(metadata, payload)
}

/// Whether every file of the container is present.
pub fn container_exists(path: impl AsRef<Path>) -> bool {
    ContainerPaths::new(path).required().iter().all(|p| p.is_file())
}
