//! Re-openable text sources. Compression reads its source twice, so a source
//! hands out a fresh reader per pass.

use hp_core::Result;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub trait TextSource {
    /// Open a new reader positioned at the start of the text.
    fn open(&self) -> Result<Box<dyn Read + '_>>;

    /// Size of the source in bytes, when cheaply known.
    fn byte_len(&self) -> Option<u64> {
        None
    }
}

impl TextSource for str {
    fn open(&self) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(self.as_bytes()))
    }

    fn byte_len(&self) -> Option<u64> {
        Some(self.len() as u64)
    }
}

impl TextSource for String {
    fn open(&self) -> Result<Box<dyn Read + '_>> {
        self.as_str().open()
    }

    fn byte_len(&self) -> Option<u64> {
        Some(self.len() as u64)
    }
}

impl TextSource for [u8] {
    fn open(&self) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(self))
    }

    fn byte_len(&self) -> Option<u64> {
        Some(self.len() as u64)
    }
}

impl TextSource for Vec<u8> {
    fn open(&self) -> Result<Box<dyn Read + '_>> {
        self.as_slice().open()
    }

    fn byte_len(&self) -> Option<u64> {
        Some(self.len() as u64)
    }
}

impl TextSource for Path {
    fn open(&self) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(self)?))
    }

    fn byte_len(&self) -> Option<u64> {
        std::fs::metadata(self).ok().map(|m| m.len())
    }
}

impl TextSource for PathBuf {
    fn open(&self) -> Result<Box<dyn Read + '_>> {
        self.as_path().open()
    }

    fn byte_len(&self) -> Option<u64> {
        self.as_path().byte_len()
    }
}
