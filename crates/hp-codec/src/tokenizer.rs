//! Streaming tokenizer.
//!
//! Char mode yields one symbol per character. Word mode classifies, in
//! priority order: a maximal run of letters / underscore, a single ASCII digit,
//! a single whitespace character, and any other single character.
//!
//! Input is read in fixed-size buffers. A letter run touching the end of the
//! buffered text may continue in the next read, so it is withheld until more
//! text arrives or the source ends. UTF-8 sequences split across reads are
//! carried over the same way. The symbol sequence is therefore identical for
//! every buffer size.

use hp_core::{HpError, Mode, Result, Symbol};
use regex::Regex;
use std::io::{ErrorKind, Read};
use std::sync::LazyLock;

use crate::source::TextSource;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)[\p{Alphabetic}_]+|[0-9]|\s|.").unwrap());

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Tokenize an in-memory string in one go.
pub fn tokenize(text: &str, mode: Mode) -> Vec<Symbol> {
    match mode {
        Mode::Char => text.chars().map(Symbol::from).collect(),
        Mode::Word => WORD_PATTERN.find_iter(text).map(|m| Symbol::from(m.as_str())).collect(),
    }
}

/// Open `source` and tokenize it lazily.
pub fn stream_tokens<S: TextSource + ?Sized>(
    source: &S,
    mode: Mode,
    buffer_size: usize,
) -> Result<Tokenizer<Box<dyn Read + '_>>> {
    Ok(Tokenizer::new(source.open()?, mode, buffer_size))
}

/// Lazy symbol iterator over a reader.
pub struct Tokenizer<R> {
    reader: R,
    mode: Mode,
    read_buf: Vec<u8>,
    /// Incomplete UTF-8 sequence from the end of the previous read.
    utf8_tail: Vec<u8>,
    text: String,
    cursor: usize,
    /// Bytes past `cursor` already known to be letter-run characters.
    run_scanned: usize,
    bytes_read: u64,
    eof: bool,
    done: bool,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R, mode: Mode, buffer_size: usize) -> Self {
        Self {
            reader,
            mode,
            read_buf: vec![0; buffer_size.max(1)],
            utf8_tail: Vec::new(),
            text: String::new(),
            cursor: 0,
            run_scanned: 0,
            bytes_read: 0,
            eof: false,
            done: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Bytes consumed from the reader so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn next_token(&mut self) -> Result<Option<Symbol>> {
        loop {
            if let Some(symbol) = self.take_buffered() {
                return Ok(Some(symbol));
            }
            if self.eof {
                return Ok(None);
            }
            self.refill()?;
        }
    }

    /// Next complete symbol from the decoded text, if one is available.
    fn take_buffered(&mut self) -> Option<Symbol> {
        let rest = &self.text[self.cursor..];
        let first = rest.chars().next()?;
        let len = match self.mode {
            Mode::Char => first.len_utf8(),
            Mode::Word => {
                if !self.eof && is_word_char(first) {
                    // Only the text added since the last look needs scanning.
                    match rest[self.run_scanned..].find(|c: char| !is_word_char(c)) {
                        Some(i) => self.run_scanned + i,
                        None => {
                            self.run_scanned = rest.len();
                            return None;
                        }
                    }
                } else {
                    WORD_PATTERN.find(rest).map(|m| m.end())?
                }
            }
        };
        let symbol = Symbol::from(&rest[..len]);
        self.cursor += len;
        self.run_scanned = 0;
        Some(symbol)
    }

    fn refill(&mut self) -> Result<()> {
        self.text.drain(..self.cursor);
        self.cursor = 0;

        let n = loop {
            match self.reader.read(&mut self.read_buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };
        let tail_offset = self.bytes_read - self.utf8_tail.len() as u64;
        if n == 0 {
            self.eof = true;
            if !self.utf8_tail.is_empty() {
                return Err(HpError::Encoding { offset: tail_offset });
            }
            return Ok(());
        }
        self.bytes_read += n as u64;

        let mut pending = std::mem::take(&mut self.utf8_tail);
        pending.extend_from_slice(&self.read_buf[..n]);
        match std::str::from_utf8(&pending) {
            Ok(s) => self.text.push_str(s),
            Err(e) => {
                let valid = e.valid_up_to();
                if e.error_len().is_some() {
                    return Err(HpError::Encoding { offset: tail_offset + valid as u64 });
                }
                let (good, tail) = pending.split_at(valid);
                let good = std::str::from_utf8(good)
                    .map_err(|_| HpError::Encoding { offset: tail_offset })?;
                self.text.push_str(good);
                self.utf8_tail = tail.to_vec();
            }
        }
        Ok(())
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Symbol>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Some(symbol)) => Some(Ok(symbol)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
