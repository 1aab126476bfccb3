//! Random access to a container's symbol sequence.
//!
//! Prefix sums over the chunk token counts map a global symbol offset to the
//! chunk holding it. A range request decodes only the chunks it overlaps,
//! through the [`ChunkCache`], and slices the result to the exact bounds.

use hp_codec::{decode_chunk, CodeBook, HuffmanTree};
use hp_core::{join_symbols, Container, HpError, HuffpageConfig, Mode, Result, Symbol};
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

use crate::cache::{CacheStats, ChunkCache, DecodedChunk};

/// One page of symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Zero-based index after clamping.
    pub index: usize,
    pub page_count: usize,
    pub symbols: Vec<Symbol>,
}

impl Page {
    pub fn text(&self) -> String {
        join_symbols(&self.symbols)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.page_count
    }
}

#[derive(Debug)]
pub struct PageHandle {
    container: Container,
    tree: HuffmanTree,
    /// `starts[i]` is the global offset of chunk `i`'s first symbol;
    /// the last entry is the total token count.
    starts: Vec<u64>,
    cache: ChunkCache,
    page_size: usize,
}

/// Open `container` for paging with default settings.
pub fn open_for_paging(container: Container) -> Result<PageHandle> {
    PageHandle::new(container, &HuffpageConfig::default())
}

/// Open `container` for paging with the page size and cache capacity of `config`.
pub fn open_for_paging_with(container: Container, config: &HuffpageConfig) -> Result<PageHandle> {
    PageHandle::new(container, config)
}

impl PageHandle {
    pub fn new(container: Container, config: &HuffpageConfig) -> Result<Self> {
        config.validate()?;
        let tree = CodeBook::from_metadata(container.metadata())?.tree;
        let mut starts = Vec::with_capacity(container.chunks().len() + 1);
        let mut acc = 0u64;
        starts.push(0);
        for chunk in container.chunks() {
            acc += chunk.token_count;
            starts.push(acc);
        }
        debug!(chunks = container.chunks().len(), tokens = acc, "opened for paging");
        Ok(Self {
            container,
            tree,
            starts,
            cache: ChunkCache::new(config.cache_capacity)?,
            page_size: config.page_size,
        })
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn into_container(self) -> Container {
        self.container
    }

    pub fn mode(&self) -> Mode {
        self.container.mode()
    }

    pub fn total_tokens(&self) -> u64 {
        self.starts[self.starts.len() - 1]
    }

    pub fn chunk_count(&self) -> usize {
        self.starts.len() - 1
    }

    /// Default page size used by [`page_count`](Self::page_count) and [`page`](Self::page).
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Global symbol range covered by chunk `index`.
    pub fn chunk_range(&self, index: usize) -> Option<Range<u64>> {
        (index < self.chunk_count()).then(|| self.starts[index]..self.starts[index + 1])
    }

    /// Chunk holding the symbol at global `offset`.
    pub fn chunk_for_offset(&self, offset: u64) -> Option<usize> {
        if offset >= self.total_tokens() {
            return None;
        }
        Some(self.starts.partition_point(|&s| s <= offset) - 1)
    }

    /// Decoded symbols of one chunk, from cache or freshly decoded.
    pub fn chunk_symbols(&mut self, index: usize) -> Result<DecodedChunk> {
        if let Some(symbols) = self.cache.get(index) {
            return Ok(symbols);
        }
        let chunk = *self.container.chunks().get(index).ok_or(HpError::IndexOutOfRange {
            index: index as u64,
            limit: self.chunk_count() as u64,
        })?;
        let symbols: DecodedChunk = decode_chunk(self.container.chunk_bytes(&chunk)?, &chunk, &self.tree)?.into();
        debug!(chunk = index, tokens = symbols.len(), "chunk decoded");
        self.cache.insert(index, Arc::clone(&symbols));
        Ok(symbols)
    }

    /// Symbols in the global range `[start, end)`.
    pub fn get_range(&mut self, start: u64, end: u64) -> Result<Vec<Symbol>> {
        let total = self.total_tokens();
        if end > total {
            return Err(HpError::IndexOutOfRange { index: end, limit: total });
        }
        if start > end {
            return Err(HpError::IndexOutOfRange { index: start, limit: end });
        }
        let mut out = Vec::with_capacity((end - start) as usize);
        if start == end {
            return Ok(out);
        }

        let (first, last) = match (self.chunk_for_offset(start), self.chunk_for_offset(end - 1)) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(HpError::IndexOutOfRange { index: end, limit: total }),
        };
        for index in first..=last {
            let symbols = self.chunk_symbols(index)?;
            let chunk_start = self.starts[index];
            let lo = start.max(chunk_start) - chunk_start;
            let hi = end.min(self.starts[index + 1]) - chunk_start;
            out.extend_from_slice(&symbols[lo as usize..hi as usize]);
        }
        Ok(out)
    }

    /// Number of pages of `page_size` symbols; never less than one.
    pub fn page_count_for(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 1;
        }
        (self.total_tokens().div_ceil(page_size as u64) as usize).max(1)
    }

    pub fn page_count(&self) -> usize {
        self.page_count_for(self.page_size)
    }

    /// Clamp `page_index` into `[0, page_count - 1]`.
    pub fn clamp_page(&self, page_index: usize, page_size: usize) -> usize {
        page_index.min(self.page_count_for(page_size) - 1)
    }

    /// Page `page_index` of `page_size` symbols. Indices past the end are
    /// clamped to the last page.
    pub fn get_page(&mut self, page_index: usize, page_size: usize) -> Result<Page> {
        if page_size == 0 {
            return Err(HpError::InvalidConfig("page_size must be at least 1".into()));
        }
        let page_count = self.page_count_for(page_size);
        let index = self.clamp_page(page_index, page_size);
        let start = index as u64 * page_size as u64;
        let end = (start + page_size as u64).min(self.total_tokens());
        let symbols = self.get_range(start, end)?;
        Ok(Page { index, page_count, symbols })
    }

    /// Page `page_index` at the handle's own page size.
    pub fn page(&mut self, page_index: usize) -> Result<Page> {
        self.get_page(page_index, self.page_size)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn is_cached(&self, chunk: usize) -> bool {
        self.cache.contains(chunk)
    }

    /// Drop every decoded chunk.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
