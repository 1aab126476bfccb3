//! Compression pipeline: frequency pass, tree, encode pass, container.

use hp_core::{
    ChunkIndex, Container, ContainerMetadata, GlobalMetadata, HpError, HuffpageConfig, Mode, Result,
};
use std::io::Write;
use tracing::info;

use crate::decoder::decode_chunk_with;
use crate::encoder::ChunkEncoder;
use crate::frequency::FrequencyTable;
use crate::source::TextSource;
use crate::tokenizer::stream_tokens;
use crate::tree::{CodeTable, HuffmanTree};

/// Tree plus the code table derived from it, built together and shared by
/// the encoder and decoder.
#[derive(Debug, Clone)]
pub struct CodeBook {
    pub tree: HuffmanTree,
    pub codes: CodeTable,
}

impl CodeBook {
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::build(table)?;
        let codes = tree.code_table();
        Ok(Self { tree, codes })
    }

    /// Rebuild from a persisted frequency record.
    pub fn from_metadata(metadata: &ContainerMetadata) -> Result<Self> {
        let table = FrequencyTable::from_counts(metadata.freq().clone())?;
        Self::build(&table)
    }
}

/// Everything the encode pass produced, with the writer handed back.
#[derive(Debug)]
pub struct EncodeOutcome<W> {
    pub writer: W,
    pub frequencies: FrequencyTable,
    pub codebook: CodeBook,
    pub metadata: ContainerMetadata,
}

impl<W> EncodeOutcome<W> {
    pub fn payload_bytes(&self) -> u64 {
        self.metadata.index.payload_bytes
    }
}

/// Run both passes over `source`, streaming the payload into `writer`.
pub fn encode_source<S, W>(source: &S, config: &HuffpageConfig, writer: W) -> Result<EncodeOutcome<W>>
where
    S: TextSource + ?Sized,
    W: Write,
{
    config.validate()?;
    let mode = config.mode;
    let buffer = config.read_buffer_bytes;

    let frequencies = FrequencyTable::build(source, mode, buffer)?;
    if frequencies.is_empty() {
        return Err(HpError::EmptyInput);
    }
    let codebook = CodeBook::build(&frequencies)?;
    info!(
        unique = frequencies.unique(),
        max_code_len = codebook.codes.max_code_len(),
        "code table ready, starting encode pass"
    );

    let mut encoder = ChunkEncoder::new(writer, &codebook.codes, mode, config.target_chunk_bytes);
    for token in stream_tokens(source, mode, buffer)? {
        encoder.encode(&token?)?;
    }
    let (writer, chunks) = encoder.finish()?;

    let index = ChunkIndex::new(mode, config.target_chunk_bytes, chunks);
    if index.total_tokens != frequencies.total() {
        return Err(HpError::SourceChanged {
            counted: frequencies.total(),
            encoded: index.total_tokens,
        });
    }
    let global = GlobalMetadata::new(mode, frequencies.counts().clone(), frequencies.total());
    let metadata = ContainerMetadata::new(global, index);
    info!(
        chunks = metadata.index.total_chunks,
        payload_bytes = metadata.index.payload_bytes,
        "encode pass complete"
    );

    Ok(EncodeOutcome { writer, frequencies, codebook, metadata })
}

/// Compress `source` into an in-memory container.
pub fn compress<S: TextSource + ?Sized>(source: &S, mode: Mode, target_chunk_bytes: u64) -> Result<Container> {
    compress_with_config(source, &HuffpageConfig::new(mode, target_chunk_bytes))
}

pub fn compress_with_config<S: TextSource + ?Sized>(source: &S, config: &HuffpageConfig) -> Result<Container> {
    let capacity = source.byte_len().map_or(0, |n| n as usize / 2);
    let outcome = encode_source(source, config, Vec::with_capacity(capacity))?;
    Container::new(outcome.metadata, outcome.writer)
}

/// Decode every chunk in order back into text.
pub fn decompress(container: &Container) -> Result<String> {
    let mut out = Vec::with_capacity(container.payload().len() * 2);
    decompress_to(container, &mut out)?;
    String::from_utf8(out).map_err(|e| HpError::Encoding { offset: e.utf8_error().valid_up_to() as u64 })
}

/// Decode every chunk in order into `writer`; returns the symbols written.
pub fn decompress_to<W: Write>(container: &Container, mut writer: W) -> Result<u64> {
    let book = CodeBook::from_metadata(container.metadata())?;
    let mut written = 0u64;
    for chunk in container.chunks() {
        let bytes = container.chunk_bytes(chunk)?;
        let mut io_result = Ok(());
        decode_chunk_with(bytes, chunk, &book.tree, |symbol| {
            if io_result.is_ok() {
                io_result = writer.write_all(symbol.as_str().as_bytes());
            }
        })?;
        io_result?;
        written += chunk.token_count;
    }
    writer.flush()?;
    Ok(written)
}
