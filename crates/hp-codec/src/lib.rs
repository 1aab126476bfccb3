//! Huffpage codec: static Huffman coding over a chunked bitstream.
//!
//! Stages:
//! 1. Tokenizer: streaming char / word symbols over bounded read buffers
//! 2. Frequency: one pass, global symbol counts
//! 3. Tree: greedy merge with canonical tie-breaking, derived code table
//! 4. Encoder: second pass, bit packing and hybrid chunk closing
//! 5. Decoder: chunk-local tree walk
//!
//! [`pipeline`] wires the stages into `compress` / `decompress`.

pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod tokenizer;
pub mod tree;

pub use decoder::{decode_chunk, decode_chunk_with};
pub use encoder::ChunkEncoder;
pub use frequency::FrequencyTable;
pub use pipeline::{compress, compress_with_config, decompress, decompress_to, encode_source, CodeBook, EncodeOutcome};
pub use report::{CodeReport, CodeReportRow};
pub use source::TextSource;
pub use tokenizer::{stream_tokens, tokenize, Tokenizer};
pub use tree::{BitCode, CodeTable, HuffmanTree, Node, NodeId};
