//! Shared types for the huffpage container: symbols, metadata records,
//! errors and configuration.

pub mod config;
pub mod error;
pub mod metadata;
pub mod types;

pub use config::HuffpageConfig;
pub use error::{HpError, Result};
pub use metadata::{Chunk, ChunkIndex, Container, ContainerMetadata, GlobalMetadata, FORMAT_VERSION};
pub use types::{join_symbols, Mode, Symbol};
