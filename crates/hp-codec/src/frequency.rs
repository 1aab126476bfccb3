//! Global frequency table, built in one streaming pass over the tokenizer.

use hp_core::{HpError, Mode, Result, Symbol};
use std::collections::BTreeMap;
use tracing::info;

use crate::source::TextSource;
use crate::tokenizer::stream_tokens;

/// Symbol counts over the whole corpus. Kept sorted so iteration order is
/// the symbol order, never insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence.
    pub fn add(&mut self, symbol: &str) {
        match self.counts.get_mut(symbol) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(Symbol::from(symbol), 1);
            }
        }
        self.total += 1;
    }

    pub fn from_tokens<I>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Symbol>>,
    {
        let mut table = Self::new();
        for token in tokens {
            table.add(token?.as_str());
        }
        Ok(table)
    }

    /// Rebuild from persisted counts.
    pub fn from_counts(counts: BTreeMap<Symbol, u64>) -> Result<Self> {
        if let Some((symbol, _)) = counts.iter().find(|(_, &c)| c == 0) {
            return Err(HpError::corrupt(format!("symbol {:?} has a zero count", symbol.as_str())));
        }
        let total = counts
            .values()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or_else(|| HpError::corrupt("frequency counts overflow"))?;
        Ok(Self { counts, total })
    }

    /// Stream `source` once and count every symbol.
    pub fn build<S: TextSource + ?Sized>(source: &S, mode: Mode, buffer_size: usize) -> Result<Self> {
        let table = Self::from_tokens(stream_tokens(source, mode, buffer_size)?)?;
        info!(mode = %mode, total = table.total, unique = table.unique(), "frequency pass complete");
        Ok(table)
    }

    pub fn get(&self, symbol: &str) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, u64)> {
        self.counts.iter().map(|(s, &c)| (s, c))
    }

    pub fn counts(&self) -> &BTreeMap<Symbol, u64> {
        &self.counts
    }

    pub fn into_counts(self) -> BTreeMap<Symbol, u64> {
        self.counts
    }
}
