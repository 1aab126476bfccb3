//! Bitstream encoder and chunker.
//!
//! Codes are packed MSB-first. Whole bytes go to the writer as soon as they
//! fill, so at most 7 bits are ever buffered. A chunk closes once it has
//! written `target_chunk_bytes` bytes; in word mode it additionally waits for
//! a sentence boundary (`.`, `!`, `?`, newline) so pages do not split
//! mid-sentence. The symbol in flight is always completed before the check,
//! so a target smaller than one code still makes progress.
//!
//! Callers writing to files should hand in a buffered writer.

use hp_core::{Chunk, HpError, Mode, Result, Symbol};
use std::io::Write;
use tracing::debug;

use crate::tree::CodeTable;

pub struct ChunkEncoder<'a, W: Write> {
    writer: W,
    codes: &'a CodeTable,
    mode: Mode,
    target_chunk_bytes: u64,
    acc: u8,
    acc_bits: u8,
    written: u64,
    chunk_start: u64,
    chunk_bytes: u64,
    chunk_tokens: u64,
    chunks: Vec<Chunk>,
}

impl<'a, W: Write> ChunkEncoder<'a, W> {
    pub fn new(writer: W, codes: &'a CodeTable, mode: Mode, target_chunk_bytes: u64) -> Self {
        Self {
            writer,
            codes,
            mode,
            target_chunk_bytes,
            acc: 0,
            acc_bits: 0,
            written: 0,
            chunk_start: 0,
            chunk_bytes: 0,
            chunk_tokens: 0,
            chunks: Vec::new(),
        }
    }

    /// Append one symbol, closing the current chunk if it became eligible.
    pub fn encode(&mut self, symbol: &Symbol) -> Result<()> {
        let codes = self.codes;
        let code = codes
            .get(symbol.as_str())
            .ok_or_else(|| HpError::UnknownSymbol(symbol.to_string()))?;
        for &bit in code.bits() {
            self.push_bit(bit)?;
        }
        self.chunk_tokens += 1;

        if self.chunk_bytes >= self.target_chunk_bytes && self.at_boundary(symbol) {
            self.close_chunk()?;
        }
        Ok(())
    }

    /// Bytes written to the payload so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Close the trailing chunk and hand back the writer with the chunk list.
    pub fn finish(mut self) -> Result<(W, Vec<Chunk>)> {
        if self.acc_bits > 0 || self.chunk_bytes > 0 || self.chunk_tokens > 0 {
            self.close_chunk()?;
        }
        self.writer.flush()?;
        Ok((self.writer, self.chunks))
    }

    fn at_boundary(&self, symbol: &Symbol) -> bool {
        match self.mode {
            Mode::Char => true,
            Mode::Word => symbol.is_sentence_boundary(),
        }
    }

    fn push_bit(&mut self, bit: bool) -> Result<()> {
        self.acc = (self.acc << 1) | bit as u8;
        self.acc_bits += 1;
        if self.acc_bits == 8 {
            let byte = self.acc;
            self.acc = 0;
            self.acc_bits = 0;
            self.write_byte(byte)?;
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.writer.write_all(&[byte])?;
        self.chunk_bytes += 1;
        self.written += 1;
        Ok(())
    }

    /// Zero-pad the residual bits, flush them and record the chunk.
    fn close_chunk(&mut self) -> Result<()> {
        let padding = if self.acc_bits > 0 { 8 - self.acc_bits } else { 0 };
        if self.acc_bits > 0 {
            let byte = self.acc << padding;
            self.acc = 0;
            self.acc_bits = 0;
            self.write_byte(byte)?;
        }

        let chunk = Chunk {
            index: self.chunks.len(),
            offset: self.chunk_start,
            length: self.chunk_bytes,
            padding,
            token_count: self.chunk_tokens,
        };
        debug!(
            index = chunk.index,
            offset = chunk.offset,
            length = chunk.length,
            padding = chunk.padding,
            tokens = chunk.token_count,
            "chunk closed"
        );
        self.chunks.push(chunk);
        self.chunk_start = self.written;
        self.chunk_bytes = 0;
        self.chunk_tokens = 0;
        Ok(())
    }
}
