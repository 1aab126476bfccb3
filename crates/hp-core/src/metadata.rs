//! Container records: the global frequency record, the chunk index, and the
//! in-memory container that pairs them with the payload bytes.
//!
//! Both records carry a `version` field. Readers reject versions newer than
//! [`FORMAT_VERSION`]; older versions are accepted as long as the fields
//! they carry validate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::warn;

use crate::error::{HpError, Result};
use crate::types::{Mode, Symbol};

/// Current on-disk schema version of both metadata records.
pub const FORMAT_VERSION: u32 = 1;

/// One independently decodable byte range of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: usize,
    /// Byte offset into the payload.
    pub offset: u64,
    /// Length in bytes.
    pub length: u64,
    /// Zero bits appended to the last byte, 0..=7.
    pub padding: u8,
    /// Number of symbols the chunk decodes to.
    #[serde(rename = "tokens")]
    pub token_count: u64,
}

impl Chunk {
    pub fn byte_range(&self) -> Range<usize> {
        self.offset as usize..self.end() as usize
    }

    /// Number of data bits, padding excluded. Saturates on lengths no real
    /// payload can have; `ContainerMetadata::validate` rejects those.
    pub fn data_bits(&self) -> u64 {
        self.length.saturating_mul(8).saturating_sub(self.padding as u64)
    }

    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.length)
    }
}

/// Global record: mode plus the whole-corpus frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalMetadata {
    pub version: u32,
    pub mode: Mode,
    pub total_tokens: u64,
    pub unique_symbols: usize,
    pub freq: BTreeMap<Symbol, u64>,
    /// RFC 3339 creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl GlobalMetadata {
    pub fn new(mode: Mode, freq: BTreeMap<Symbol, u64>, total_tokens: u64) -> Self {
        Self {
            version: FORMAT_VERSION,
            mode,
            total_tokens,
            unique_symbols: freq.len(),
            freq,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }
}

/// Chunk index record: the ordered chunk list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkIndex {
    pub version: u32,
    pub mode: Mode,
    pub target_chunk_bytes: u64,
    pub total_chunks: usize,
    pub total_tokens: u64,
    pub payload_bytes: u64,
    pub chunks: Vec<Chunk>,
}

impl ChunkIndex {
    pub fn new(mode: Mode, target_chunk_bytes: u64, chunks: Vec<Chunk>) -> Self {
        Self {
            version: FORMAT_VERSION,
            mode,
            target_chunk_bytes,
            total_chunks: chunks.len(),
            total_tokens: chunks.iter().map(|c| c.token_count).sum(),
            payload_bytes: chunks.last().map(Chunk::end).unwrap_or(0),
            chunks,
        }
    }
}

/// Both records, fully loaded before any decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerMetadata {
    pub global: GlobalMetadata,
    pub index: ChunkIndex,
}

impl ContainerMetadata {
    pub fn new(global: GlobalMetadata, index: ChunkIndex) -> Self {
        Self { global, index }
    }

    pub fn mode(&self) -> Mode {
        self.global.mode
    }

    pub fn total_tokens(&self) -> u64 {
        self.global.total_tokens
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.index.chunks
    }

    pub fn freq(&self) -> &BTreeMap<Symbol, u64> {
        &self.global.freq
    }

    /// Check the records against each other and against the payload length.
    pub fn validate(&self, payload_len: u64) -> Result<()> {
        let result = self.check(payload_len);
        if let Err(ref e) = result {
            warn!(error = %e, "container metadata rejected");
        }
        result
    }

    fn check(&self, payload_len: u64) -> Result<()> {
        let g = &self.global;
        let idx = &self.index;

        for (name, version) in [("global", g.version), ("chunk index", idx.version)] {
            if version == 0 || version > FORMAT_VERSION {
                return Err(HpError::corrupt(format!("unsupported {name} version {version}")));
            }
        }
        if g.mode != idx.mode {
            return Err(HpError::corrupt(format!(
                "mode mismatch: global record says {}, chunk index says {}",
                g.mode, idx.mode
            )));
        }
        if g.unique_symbols != g.freq.len() {
            return Err(HpError::corrupt(format!(
                "unique_symbols is {} but frequency table has {} entries",
                g.unique_symbols,
                g.freq.len()
            )));
        }
        if g.freq.values().any(|&c| c == 0) {
            return Err(HpError::corrupt("frequency table contains a zero count"));
        }
        let freq_total = g
            .freq
            .values()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or_else(|| HpError::corrupt("frequency counts overflow"))?;
        if freq_total != g.total_tokens {
            return Err(HpError::corrupt(format!(
                "frequency counts sum to {freq_total}, total_tokens is {}",
                g.total_tokens
            )));
        }
        if idx.total_chunks != idx.chunks.len() {
            return Err(HpError::corrupt(format!(
                "total_chunks is {} but {} chunks are listed",
                idx.total_chunks,
                idx.chunks.len()
            )));
        }

        let mut expected_offset = 0u64;
        let mut token_sum = 0u64;
        for (i, chunk) in idx.chunks.iter().enumerate() {
            if chunk.index != i {
                return Err(HpError::corrupt(format!("chunk at position {i} has index {}", chunk.index)));
            }
            if chunk.offset != expected_offset {
                return Err(HpError::corrupt(format!(
                    "chunk {i} starts at {} but previous chunk ends at {expected_offset}",
                    chunk.offset
                )));
            }
            if chunk.padding > 7 {
                return Err(HpError::corrupt(format!("chunk {i} has padding {}", chunk.padding)));
            }
            if chunk.length == 0 || chunk.token_count == 0 {
                return Err(HpError::corrupt(format!("chunk {i} is empty")));
            }
            if chunk.length > u64::MAX / 8 {
                return Err(HpError::corrupt(format!("chunk {i} length {} is out of range", chunk.length)));
            }
            // Every code is at least one bit long.
            if chunk.token_count > chunk.data_bits() {
                return Err(HpError::corrupt(format!(
                    "chunk {i} declares {} symbols in {} bits",
                    chunk.token_count,
                    chunk.data_bits()
                )));
            }
            expected_offset = chunk
                .offset
                .checked_add(chunk.length)
                .ok_or_else(|| HpError::corrupt(format!("chunk {i} ends past the addressable range")))?;
            token_sum = token_sum
                .checked_add(chunk.token_count)
                .ok_or_else(|| HpError::corrupt("chunk token counts overflow"))?;
        }

        if token_sum != idx.total_tokens || token_sum != g.total_tokens {
            return Err(HpError::corrupt(format!(
                "chunk token counts sum to {token_sum}, records say {} / {}",
                idx.total_tokens, g.total_tokens
            )));
        }
        if expected_offset != idx.payload_bytes || idx.payload_bytes != payload_len {
            return Err(HpError::corrupt(format!(
                "chunks cover {expected_offset} bytes, index says {}, payload has {payload_len}",
                idx.payload_bytes
            )));
        }
        Ok(())
    }
}

/// Payload plus metadata; owns both for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    metadata: ContainerMetadata,
    payload: Vec<u8>,
}

impl Container {
    /// Pair metadata with payload, rejecting combinations that disagree.
    pub fn new(metadata: ContainerMetadata, payload: Vec<u8>) -> Result<Self> {
        metadata.validate(payload.len() as u64)?;
        Ok(Self { metadata, payload })
    }

    pub fn metadata(&self) -> &ContainerMetadata {
        &self.metadata
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn mode(&self) -> Mode {
        self.metadata.mode()
    }

    pub fn total_tokens(&self) -> u64 {
        self.metadata.total_tokens()
    }

    pub fn chunks(&self) -> &[Chunk] {
        self.metadata.chunks()
    }

    /// Bytes belonging to one chunk.
    pub fn chunk_bytes(&self, chunk: &Chunk) -> Result<&[u8]> {
        self.payload.get(chunk.byte_range()).ok_or_else(|| {
            HpError::corrupt(format!(
                "chunk {} range {:?} exceeds payload of {} bytes",
                chunk.index,
                chunk.byte_range(),
                self.payload.len()
            ))
        })
    }

    pub fn into_parts(self) -> (ContainerMetadata, Vec<u8>) {
        (self.metadata, self.payload)
    }
}
