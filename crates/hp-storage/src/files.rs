//! File-to-container compression and container-to-file decompression.
//!
//! Both directions stream: the encode pass writes payload bytes straight into
//! a staged temp file, and decompression reads one chunk's byte range at a
//! time. Memory stays bounded by the read buffer, the symbol table and the
//! largest chunk.

use hp_codec::{decode_chunk_with, encode_source, CodeBook, CodeReport};
use hp_core::{HpError, HuffpageConfig, Mode, Result};
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::container::{read_metadata, record_bytes};
use crate::paths::ContainerPaths;
use crate::publish::{finish_staged, staged_writer, Publication};

/// Statistics for one `compress_file` run.
#[derive(Debug, Clone)]
pub struct CompressionReport {
    pub paths: ContainerPaths,
    pub mode: Mode,
    pub original_bytes: u64,
    /// Payload size.
    pub compressed_bytes: u64,
    /// Size of the two JSON records.
    pub metadata_bytes: u64,
    pub total_tokens: u64,
    pub unique_symbols: usize,
    pub chunk_count: usize,
}

impl CompressionReport {
    /// Payload size over input size.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 1.0;
        }
        self.compressed_bytes as f64 / self.original_bytes as f64
    }

    pub fn space_saving_pct(&self) -> f64 {
        (1.0 - self.ratio()) * 100.0
    }

    /// Everything written to disk, records included.
    pub fn total_bytes(&self) -> u64 {
        self.compressed_bytes + self.metadata_bytes
    }
}

/// Statistics for one `decompress_file` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressionReport {
    pub output: PathBuf,
    pub mode: Mode,
    pub chunk_count: usize,
    pub total_tokens: u64,
    pub output_bytes: u64,
}

/// Compress the text file at `input` into a container at `output`
/// (`.huff` appended if missing).
///
/// Nothing becomes visible at `output` unless every file was written. An
/// existing container there is withdrawn (global record first) while the
/// new one is placed, and put back if any step fails.
pub fn compress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &HuffpageConfig,
) -> Result<CompressionReport> {
    config.validate()?;
    let input = input.as_ref();
    let paths = ContainerPaths::new(output);
    let original_bytes = fs::metadata(input)?.len();
    info!(input = %input.display(), mode = %config.mode, target = config.target_chunk_bytes, "compressing file");

    let outcome = encode_source(input, config, staged_writer(paths.dir())?)?;
    let metadata = &outcome.metadata;
    let index = record_bytes(&metadata.index)?;
    let global = record_bytes(&metadata.global)?;

    let mut publication = Publication::new();
    publication.retire(&paths.global)?;
    publication.place(finish_staged(outcome.writer)?, &paths.payload)?;
    publication.place_bytes(&index, &paths.index)?;
    if config.write_code_report {
        let report = CodeReport::new(&outcome.frequencies, &outcome.codebook.codes, config.mode)?;
        publication.place_bytes(report.to_string().as_bytes(), &paths.codes)?;
    } else {
        publication.retire(&paths.codes)?;
    }
    publication.place_bytes(&global, &paths.global)?;
    publication.commit();

    let report = CompressionReport {
        mode: config.mode,
        original_bytes,
        compressed_bytes: metadata.index.payload_bytes,
        metadata_bytes: (index.len() + global.len()) as u64,
        total_tokens: metadata.global.total_tokens,
        unique_symbols: metadata.global.unique_symbols,
        chunk_count: metadata.index.total_chunks,
        paths,
    };
    info!(
        path = %report.paths.payload.display(),
        original_bytes = report.original_bytes,
        compressed_bytes = report.compressed_bytes,
        chunks = report.chunk_count,
        saving_pct = report.space_saving_pct(),
        "compression complete"
    );
    Ok(report)
}

/// Decompress the container at `huff` into the text file `output`.
pub fn decompress_file(huff: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<DecompressionReport> {
    let paths = ContainerPaths::new(huff);
    let output = output.as_ref();
    let metadata = read_metadata(&paths)?;
    let book = CodeBook::from_metadata(&metadata)?;
    info!(path = %paths.payload.display(), mode = %metadata.mode(), chunks = metadata.index.total_chunks, "decompressing");

    let mut payload = File::open(&paths.payload)?;
    let dir = output.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut writer = staged_writer(dir)?;
    let mut buf = Vec::new();
    let mut output_bytes = 0u64;

    for chunk in metadata.chunks() {
        buf.resize(chunk.length as usize, 0);
        payload.seek(SeekFrom::Start(chunk.offset))?;
        payload.read_exact(&mut buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => {
                HpError::alignment(chunk.index, "payload ends inside the chunk")
            }
            _ => HpError::Io(e),
        })?;

        let mut io_result = Ok(());
        decode_chunk_with(&buf, chunk, &book.tree, |symbol| {
            if io_result.is_ok() {
                let bytes = symbol.as_str().as_bytes();
                output_bytes += bytes.len() as u64;
                io_result = writer.write_all(bytes);
            }
        })?;
        io_result?;
    }

    let mut publication = Publication::new();
    publication.place(finish_staged(writer)?, output)?;
    publication.commit();

    info!(output = %output.display(), bytes = output_bytes, "decompression complete");
    Ok(DecompressionReport {
        output: output.to_path_buf(),
        mode: metadata.mode(),
        chunk_count: metadata.index.total_chunks,
        total_tokens: metadata.total_tokens(),
        output_bytes,
    })
}
