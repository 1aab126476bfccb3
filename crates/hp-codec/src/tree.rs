//! Huffman tree and code table.
//!
//! Nodes live in an arena and refer to children by index, so the tree is
//! dropped as one `Vec`. Leaves are created in symbol order and receive ids
//! `0..n`; internal nodes take the next id as they are created. The merge
//! always pops the smallest `(frequency, id)` pair, which makes the tree a pure
//! function of the frequency table regardless of how the table was loaded.

use hp_core::{HpError, Result, Symbol};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use tracing::debug;

use crate::frequency::FrequencyTable;

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: Symbol, freq: u64 },
    Internal { freq: u64, left: NodeId, right: NodeId },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Greedy construction. A table with one distinct symbol yields a lone leaf.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        if table.is_empty() {
            return Err(HpError::EmptyInput);
        }

        let n = table.unique();
        let mut nodes = Vec::with_capacity(2 * n - 1);
        let mut heap = BinaryHeap::with_capacity(n);
        for (symbol, freq) in table.iter() {
            heap.push(Reverse((freq, nodes.len())));
            nodes.push(Node::Leaf { symbol: symbol.clone(), freq });
        }

        while heap.len() > 1 {
            let (Some(Reverse((lf, left))), Some(Reverse((rf, right)))) = (heap.pop(), heap.pop()) else {
                break;
            };
            let freq = lf + rf;
            heap.push(Reverse((freq, nodes.len())));
            nodes.push(Node::Internal { freq, left, right });
        }

        let Some(Reverse((_, root))) = heap.pop() else {
            return Err(HpError::EmptyInput);
        };
        debug!(leaves = n, nodes = nodes.len(), "huffman tree built");
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    /// True when the root itself is a leaf (one distinct symbol).
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.nodes[self.root], Node::Leaf { .. })
    }

    /// Follow one bit from an internal node; `None` at a leaf.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
            Node::Leaf { .. } => None,
        }
    }

    /// Derive every leaf's code, 0 = left, 1 = right, walking with an
    /// explicit stack.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = HashMap::with_capacity(self.nodes.len() / 2 + 1);
        let mut stack = vec![(self.root, BitCode::default())];
        while let Some((id, prefix)) = stack.pop() {
            match &self.nodes[id] {
                Node::Leaf { symbol, .. } => {
                    let code = if prefix.is_empty() { BitCode::from_bits(vec![false]) } else { prefix };
                    codes.insert(symbol.clone(), code);
                }
                Node::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(true);
                    stack.push((*right, right_prefix));
                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((*left, left_prefix));
                }
            }
        }
        CodeTable { codes }
    }
}

/// Variable-length code, most significant bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitCode {
    bits: Vec<bool>,
}

impl BitCode {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &BitCode) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for BitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol → code mapping derived from a [`HuffmanTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<Symbol, BitCode>,
}

impl CodeTable {
    pub fn get(&self, symbol: &str) -> Option<&BitCode> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &BitCode)> {
        self.codes.iter()
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(BitCode::len).max().unwrap_or(0)
    }

    /// No code is a prefix of another. After sorting, a prefix always sorts
    /// directly before some code it prefixes, so adjacent pairs suffice.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&BitCode> = self.codes.values().collect();
        sorted.sort();
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }

    /// Total payload bits for a corpus with these frequencies.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .map(|(s, c)| c * self.get(s.as_str()).map_or(0, |code| code.len() as u64))
            .sum()
    }
}
