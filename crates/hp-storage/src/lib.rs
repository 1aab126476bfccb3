//! Huffpage storage layer: container files, atomic publication and
//! streaming file compression.

pub mod container;
pub mod files;
pub mod paths;
pub mod publish;

pub use container::{container_exists, read_container, read_metadata, write_container};
pub use files::{compress_file, decompress_file, CompressionReport, DecompressionReport};
pub use paths::{default_output_path, ensure_huff_extension, ContainerPaths};
pub use publish::Publication;
