//! Code report: per-symbol frequency, code and bit cost, plus size estimates.

use hp_core::{HpError, Mode, Result, Symbol};
use std::fmt;

use crate::frequency::FrequencyTable;
use crate::tree::{BitCode, CodeTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReportRow {
    pub symbol: Symbol,
    pub frequency: u64,
    pub code: BitCode,
    pub bits_used: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeReport {
    pub mode: Mode,
    pub total_tokens: u64,
    pub unique_symbols: usize,
    /// Descending frequency, ties by symbol.
    pub rows: Vec<CodeReportRow>,
    pub compressed_bits: u64,
    /// Nominal size of the text: 8 bits per symbol in char mode, 16 in word mode.
    pub original_bits: u64,
}

impl CodeReport {
    pub fn new(table: &FrequencyTable, codes: &CodeTable, mode: Mode) -> Result<Self> {
        let mut rows = Vec::with_capacity(table.unique());
        for (symbol, frequency) in table.iter() {
            let code = codes
                .get(symbol.as_str())
                .ok_or_else(|| HpError::UnknownSymbol(symbol.to_string()))?;
            rows.push(CodeReportRow {
                symbol: symbol.clone(),
                frequency,
                code: code.clone(),
                bits_used: frequency * code.len() as u64,
            });
        }
        rows.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.symbol.cmp(&b.symbol)));

        Ok(Self {
            mode,
            total_tokens: table.total(),
            unique_symbols: table.unique(),
            compressed_bits: rows.iter().map(|r| r.bits_used).sum(),
            original_bits: table.total() * mode.nominal_symbol_bits(),
            rows,
        })
    }

    /// Estimated space saving in percent.
    pub fn estimated_saving_pct(&self) -> f64 {
        if self.original_bits == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_bits as f64 / self.original_bits as f64) * 100.0
    }

    /// Mean code length weighted by frequency.
    pub fn average_code_len(&self) -> f64 {
        if self.total_tokens == 0 {
            return 0.0;
        }
        self.compressed_bits as f64 / self.total_tokens as f64
    }
}

impl fmt::Display for CodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.mode {
            Mode::Char => "Character-Level",
            Mode::Word => "Word-Level",
        };
        let rule = "=".repeat(80);
        writeln!(f, "Huffman Encoding Report ({level})")?;
        writeln!(f, "Total Tokens: {}", self.total_tokens)?;
        writeln!(f, "Unique Symbols: {}", self.unique_symbols)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:<20} | {:<10} | {:<20} | Bits Used", "Symbol", "Frequency", "Code")?;
        writeln!(f, "{}", "-".repeat(80))?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<20} | {:<10} | {:<20} | {}",
                row.symbol.escaped(),
                row.frequency,
                row.code.to_string(),
                row.bits_used
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Original size (symbol-based bits): {}", self.original_bits)?;
        writeln!(f, "Compressed size (symbol-based bits): {}", self.compressed_bits)?;
        writeln!(f, "Estimated compression ratio: {:.2}%", self.estimated_saving_pct())
    }
}
