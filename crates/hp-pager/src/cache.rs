//! Decoded-chunk memo keyed by chunk index.
//!
//! Unbounded by default: every chunk is decoded at most once for the life of
//! the handle. With a capacity the least recently used chunk is evicted and
//! decoded again on its next visit.

use hp_core::{HpError, Result, Symbol};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Decoded symbols of one chunk, shared between the cache and callers.
pub type DecodedChunk = Arc<[Symbol]>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            return 0.0;
        }
        self.hits as f64 / lookups as f64
    }
}

pub struct ChunkCache {
    entries: LruCache<usize, DecodedChunk>,
    hits: u64,
    misses: u64,
}

impl ChunkCache {
    /// `None` never evicts; `Some(n)` keeps the `n` most recently used chunks.
    pub fn new(capacity: Option<usize>) -> Result<Self> {
        let entries = match capacity {
            None => LruCache::unbounded(),
            Some(n) => {
                let cap = NonZeroUsize::new(n)
                    .ok_or_else(|| HpError::InvalidConfig("cache_capacity must be at least 1".into()))?;
                LruCache::new(cap)
            }
        };
        Ok(Self { entries, hits: 0, misses: 0 })
    }

    pub fn unbounded() -> Self {
        Self { entries: LruCache::unbounded(), hits: 0, misses: 0 }
    }

    /// Look up a chunk, counting the hit or miss.
    pub fn get(&mut self, chunk: usize) -> Option<DecodedChunk> {
        match self.entries.get(&chunk) {
            Some(symbols) => {
                self.hits += 1;
                Some(Arc::clone(symbols))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, chunk: usize, symbols: DecodedChunk) {
        self.entries.put(chunk, symbols);
    }

    pub fn contains(&self, chunk: usize) -> bool {
        self.entries.contains(&chunk)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        match self.entries.cap().get() {
            usize::MAX => None,
            n => Some(n),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats { hits: self.hits, misses: self.misses, entries: self.entries.len() }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl std::fmt::Debug for ChunkCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}
