use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HpError, Result};
use crate::types::Mode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffpageConfig {
    #[serde(default)]
    pub mode: Mode,
    /// Chunks close once at least this many bytes were written (and, in word
    /// mode, a sentence boundary was just emitted).
    #[serde(default = "default_target_chunk_bytes")]
    pub target_chunk_bytes: u64,
    /// Size of each read while streaming the source.
    #[serde(default = "default_read_buffer_bytes")]
    pub read_buffer_bytes: usize,
    /// Symbols per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// `None` keeps every decoded chunk; `Some(n)` keeps the n most recently used.
    #[serde(default)]
    pub cache_capacity: Option<usize>,
    #[serde(default)]
    pub write_code_report: bool,
}

fn default_target_chunk_bytes() -> u64 {
    512 * 1024
}

fn default_read_buffer_bytes() -> usize {
    1024 * 1024
}

fn default_page_size() -> usize {
    250
}

impl Default for HuffpageConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            target_chunk_bytes: default_target_chunk_bytes(),
            read_buffer_bytes: default_read_buffer_bytes(),
            page_size: default_page_size(),
            cache_capacity: None,
            write_code_report: false,
        }
    }
}

impl HuffpageConfig {
    pub fn new(mode: Mode, target_chunk_bytes: u64) -> Self {
        Self { mode, target_chunk_bytes, ..Self::default() }
    }

    pub fn with_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes;
        self
    }

    pub fn with_page_size(mut self, symbols: usize) -> Self {
        self.page_size = symbols;
        self
    }

    pub fn with_cache_capacity(mut self, chunks: Option<usize>) -> Self {
        self.cache_capacity = chunks;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| HpError::InvalidConfig(format!("parse: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_chunk_bytes == 0 {
            return Err(HpError::InvalidConfig("target_chunk_bytes must be at least 1".into()));
        }
        if self.read_buffer_bytes == 0 {
            return Err(HpError::InvalidConfig("read_buffer_bytes must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(HpError::InvalidConfig("page_size must be at least 1".into()));
        }
        if self.cache_capacity == Some(0) {
            return Err(HpError::InvalidConfig("cache_capacity must be at least 1 when set".into()));
        }
        Ok(())
    }
}
