// SPDX-License-Identifier: Apache-2.0

//! Structural tokenizer.
//!
//! Scans the input once, a chunk at a time, and yields only the structural
//! markers `{ } [ ] " : ,`. Everything else, including whitespace, numbers,
//! literals and the contents of string literals, is invisible to it.

use crate::cancel::CancelToken;
use crate::chunk_reader::Reader;
use crate::parse_error::ParseError;
use crate::token::{Token, TokenKind};

/// Where the tokenizer is in its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Active,
    /// The reader reported end of input
    Exhausted,
    /// A failure was reported; nothing more will be yielded
    Failed,
}

/// A lazy, forward-only stream of structural tokens.
///
/// The scan state (inside-string flag and previous byte) is carried across
/// chunk refills, so where the reader splits the input never changes the
/// tokens produced. Offsets are absolute byte offsets from the start of the
/// input.
///
/// Besides the inherent [`Tokenizer::next_token`], the tokenizer is an
/// [`Iterator`] over `Result<Token, ParseError>` which ends after the first
/// error.
pub struct Tokenizer<'b, 'c, R: Reader, C: CancelToken + ?Sized> {
    reader: R,
    /// Scratch chunk; `chunk[pos..len]` is still unscanned
    chunk: &'b mut [u8],
    len: usize,
    pos: usize,
    /// Absolute offset of `chunk[0]`
    base: usize,
    in_string: bool,
    previous: u8,
    cancel: &'c C,
    state: ScanState,
}

impl<'b, 'c, R: Reader, C: CancelToken + ?Sized> Tokenizer<'b, 'c, R, C> {
    /// Create a tokenizer that scans `reader` through `chunk`.
    ///
    /// The length of `chunk` bounds how much input is held at once. A
    /// zero-length chunk makes the first call fail with
    /// [`ParseError::EmptyScratchBuffer`].
    pub fn new(reader: R, chunk: &'b mut [u8], cancel: &'c C) -> Self {
        Self {
            reader,
            chunk,
            len: 0,
            pos: 0,
            base: 0,
            in_string: false,
            previous: 0,
            cancel,
            state: ScanState::Active,
        }
    }

    /// Number of input bytes scanned so far.
    ///
    /// Once the stream is exhausted this is the total input length.
    pub fn consumed(&self) -> usize {
        self.base.saturating_add(self.pos)
    }

    /// Whether the scan currently sits inside a string literal
    pub fn in_string(&self) -> bool {
        self.in_string
    }

    /// Scan forward to the next structural token.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        if self.state == ScanState::Failed {
            return Ok(None);
        }
        let result = self.scan();
        if result.is_err() {
            self.state = ScanState::Failed;
        }
        result
    }

    fn scan(&mut self) -> Result<Option<Token>, ParseError> {
        loop {
            if self.pos >= self.len && !self.refill()? {
                return Ok(None);
            }
            if self.cancel.is_cancelled() {
                log::debug!("tokenizer cancelled at offset {}", self.consumed());
                return Err(ParseError::Cancelled);
            }

            let byte = match self.chunk.get(self.pos) {
                Some(&b) => b,
                None => return Err(ParseError::ReaderError),
            };
            let offset = self.consumed();
            self.pos += 1;
            let previous = core::mem::replace(&mut self.previous, byte);

            if self.in_string {
                if byte == b'"' && previous != b'\\' {
                    self.in_string = false;
                    return Ok(Some(Token::new(TokenKind::Quote, offset)));
                }
                continue;
            }

            if let Some(kind) = TokenKind::from_structural(byte) {
                if kind == TokenKind::Quote {
                    self.in_string = true;
                }
                return Ok(Some(Token::new(kind, offset)));
            }
        }
    }

    /// Pull the next chunk from the reader.
    /// Returns `false` once the reader is exhausted.
    fn refill(&mut self) -> Result<bool, ParseError> {
        if self.state == ScanState::Exhausted {
            return Ok(false);
        }
        if self.chunk.is_empty() {
            return Err(ParseError::EmptyScratchBuffer);
        }

        self.base = self.base.saturating_add(self.len);
        self.pos = 0;
        self.len = 0;

        let read = self
            .reader
            .read(self.chunk)
            .map_err(|_| ParseError::ReaderError)?;
        if read == 0 {
            log::trace!("input exhausted after {} bytes", self.base);
            self.state = ScanState::Exhausted;
            return Ok(false);
        }
        if read > self.chunk.len() {
            return Err(ParseError::ReaderError);
        }

        log::trace!("chunk refilled: {} bytes at offset {}", read, self.base);
        self.len = read;
        Ok(true)
    }
}

impl<R: Reader, C: CancelToken + ?Sized> Iterator for Tokenizer<'_, '_, R, C> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl<R: Reader, C: CancelToken + ?Sized> core::iter::FusedIterator for Tokenizer<'_, '_, R, C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::NeverCancel;
    use crate::chunk_reader::ChunkReader;
    use core::sync::atomic::AtomicBool;
    use test_log::test;
    use TokenKind::*;

    fn collect_tokens(input: &[u8], read_size: usize, chunk_size: usize) -> Vec<Token> {
        let mut chunk = vec![0u8; chunk_size];
        let reader = ChunkReader::new(input, read_size);
        Tokenizer::new(reader, &mut chunk, &NeverCancel)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_structural_tokens_with_offsets() {
        let tokens = collect_tokens(br#"{"a": ["b", "c"]}"#, usize::MAX, 64);
        let expected = [
            (ObjectStart, 0),
            (Quote, 1),
            (Quote, 3),
            (Colon, 4),
            (ArrayStart, 6),
            (Quote, 7),
            (Quote, 9),
            (Comma, 10),
            (Quote, 12),
            (Quote, 14),
            (ArrayEnd, 15),
            (ObjectEnd, 16),
        ];
        let actual: Vec<_> = tokens.iter().map(|t| (t.kind, t.offset)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_structure_inside_strings_is_ignored() {
        let tokens = collect_tokens(br#""{[:,]}""#, usize::MAX, 64);
        assert_eq!(kinds(&tokens), [Quote, Quote]);
        assert_eq!(tokens[1].offset, 7);
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let tokens = collect_tokens(br#""say \"hi\"" ,"#, usize::MAX, 64);
        assert_eq!(kinds(&tokens), [Quote, Quote, Comma]);
        assert_eq!(tokens[1].offset, 11);
    }

    #[test]
    fn test_literals_and_whitespace_are_invisible() {
        let tokens = collect_tokens(b"[1, true,\n null, -2.5e3]", usize::MAX, 64);
        assert_eq!(kinds(&tokens), [ArrayStart, Comma, Comma, Comma, ArrayEnd]);
    }

    #[test]
    fn test_chunking_does_not_change_tokens() {
        let input = br#"{"key\"with\"quotes": ["x,y", "{z}"], "k2": "v"}"#;
        let reference = collect_tokens(input, usize::MAX, 256);
        for chunk_size in 1..=input.len() {
            assert_eq!(
                collect_tokens(input, usize::MAX, chunk_size),
                reference,
                "chunk size {chunk_size}"
            );
            assert_eq!(
                collect_tokens(input, chunk_size, 256),
                reference,
                "read size {chunk_size}"
            );
        }
    }

    #[test]
    fn test_consumed_reaches_input_length() {
        let input = b"  [\"a\"]  ";
        let mut chunk = [0u8; 3];
        let mut tokenizer = Tokenizer::new(ChunkReader::full_slice(input), &mut chunk, &NeverCancel);
        while let Some(token) = tokenizer.next_token().unwrap() {
            assert!(token.offset < tokenizer.consumed());
        }
        assert_eq!(tokenizer.consumed(), input.len());
        assert_eq!(tokenizer.next_token(), Ok(None));
    }

    #[test]
    fn test_unterminated_string_leaves_flag_set() {
        let mut chunk = [0u8; 8];
        let mut tokenizer =
            Tokenizer::new(ChunkReader::full_slice(b"[\"abc"), &mut chunk, &NeverCancel);
        assert_eq!(tokenizer.by_ref().count(), 2);
        assert!(tokenizer.in_string());
    }

    #[test]
    fn test_empty_chunk_is_rejected() {
        let mut chunk = [0u8; 0];
        let mut tokenizer = Tokenizer::new(ChunkReader::full_slice(b"{}"), &mut chunk, &NeverCancel);
        assert_eq!(tokenizer.next(), Some(Err(ParseError::EmptyScratchBuffer)));
        assert_eq!(tokenizer.next(), None);
    }

    #[test]
    fn test_cancellation_stops_the_stream() {
        let cancel = AtomicBool::new(true);
        let mut chunk = [0u8; 8];
        let mut tokenizer = Tokenizer::new(ChunkReader::full_slice(b"{}"), &mut chunk, &cancel);
        assert_eq!(tokenizer.next(), Some(Err(ParseError::Cancelled)));
        assert_eq!(tokenizer.next(), None);
    }

    struct BrokenReader;

    impl Reader for BrokenReader {
        type Error = ();

        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
            Err(())
        }
    }

    #[test]
    fn test_reader_failure_is_reported_once() {
        let mut chunk = [0u8; 8];
        let mut tokenizer = Tokenizer::new(BrokenReader, &mut chunk, &NeverCancel);
        assert_eq!(tokenizer.next(), Some(Err(ParseError::ReaderError)));
        assert_eq!(tokenizer.next(), None);
    }
}
