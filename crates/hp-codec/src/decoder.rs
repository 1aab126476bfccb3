//! Chunk-local bitstream decoder.
//!
//! The trailing `padding` bits are structural fill and are never walked. A
//! chunk must resolve to exactly its declared token count with no bits left
//! inside an unfinished code; anything else is reported as a
//! [`HpError::DecodeAlignment`] for that chunk.

use hp_core::{Chunk, HpError, Result, Symbol};

use crate::tree::{HuffmanTree, Node};

/// Decode one chunk into its symbols.
pub fn decode_chunk(bytes: &[u8], chunk: &Chunk, tree: &HuffmanTree) -> Result<Vec<Symbol>> {
    // Each symbol takes at least one bit of the bytes actually handed in.
    let bound = (bytes.len() as u64).saturating_mul(8);
    let mut out = Vec::with_capacity(chunk.token_count.min(bound) as usize);
    decode_chunk_with(bytes, chunk, tree, |s| out.push(s.clone()))?;
    Ok(out)
}

/// Decode one chunk, handing each symbol to `emit` in order.
pub fn decode_chunk_with<F>(bytes: &[u8], chunk: &Chunk, tree: &HuffmanTree, mut emit: F) -> Result<()>
where
    F: FnMut(&Symbol),
{
    let index = chunk.index;
    if bytes.len() as u64 != chunk.length {
        return Err(HpError::alignment(
            index,
            format!("expected {} bytes, got {}", chunk.length, bytes.len()),
        ));
    }
    if chunk.padding > 7 || (chunk.length == 0 && chunk.padding > 0) {
        return Err(HpError::alignment(index, format!("invalid padding {}", chunk.padding)));
    }

    let expected = chunk.token_count;
    let root = tree.root();
    let mut node = root;
    let mut emitted = 0u64;

    for i in 0..chunk.data_bits() {
        let bit = (bytes[(i / 8) as usize] >> (7 - (i % 8))) & 1 == 1;

        let leaf = if tree.is_single_leaf() {
            if bit {
                return Err(HpError::alignment(index, format!("bit {i} is 1 in a single-symbol stream")));
            }
            root
        } else {
            node = tree
                .child(node, bit)
                .ok_or_else(|| HpError::alignment(index, format!("walked past a leaf at bit {i}")))?;
            if tree.node(node).symbol().is_none() {
                continue;
            }
            node
        };

        if emitted == expected {
            return Err(HpError::alignment(
                index,
                format!("more than the declared {expected} symbols (at bit {i})"),
            ));
        }
        if let Node::Leaf { symbol, .. } = tree.node(leaf) {
            emit(symbol);
        }
        emitted += 1;
        node = root;
    }

    if node != root {
        return Err(HpError::alignment(index, "trailing bits do not complete a code"));
    }
    if emitted != expected {
        return Err(HpError::alignment(
            index,
            format!("decoded {emitted} symbols, expected {expected}"),
        ));
    }
    Ok(())
}
