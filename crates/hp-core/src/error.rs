use thiserror::Error;

#[derive(Error, Debug)]
pub enum HpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid UTF-8 text at byte offset {offset}")]
    Encoding { offset: u64 },
    #[error("Input contains no symbols to compress")]
    EmptyInput,
    #[error("Container metadata not found: {path}")]
    MetadataMissing { path: String },
    #[error("Container metadata is corrupt: {0}")]
    MetadataCorrupt(String),
    #[error("Chunk {chunk} failed to decode: {reason}")]
    DecodeAlignment { chunk: usize, reason: String },
    #[error("Index {index} out of range (limit {limit})")]
    IndexOutOfRange { index: u64, limit: u64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Symbol not present in code table: {0:?}")]
    UnknownSymbol(String),
    #[error("Source changed between passes: counted {counted} symbols, encoded {encoded}")]
    SourceChanged { counted: u64, encoded: u64 },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HpError {
    pub fn alignment(chunk: usize, reason: impl Into<String>) -> Self {
        Self::DecodeAlignment { chunk, reason: reason.into() }
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::MetadataCorrupt(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, HpError>;
