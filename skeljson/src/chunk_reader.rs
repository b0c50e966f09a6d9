// SPDX-License-Identifier: Apache-2.0

//! Input sources for the tokenizer.
//!
//! The tokenizer never looks at the whole input at once. It asks a [`Reader`]
//! to fill its scratch chunk, scans the chunk, and asks again. [`ChunkReader`]
//! covers the common case of an input that already sits in memory, and
//! [`IoReader`] (with the `std` feature) adapts any [`std::io::Read`].
//!
//! # Example
//!
//! ```rust
//! use skeljson::{ChunkReader, NeverCancel, SkeletonParser};
//!
//! let json = br#"{"hello": {"en": "Hello", "fr": "Bonjour"}}"#;
//! // Simulate a source that hands out at most 4 bytes per read
//! let reader = ChunkReader::new(json, 4);
//! let mut scratch = [0u8; 16];
//! let root = SkeletonParser::new(reader, &mut scratch)
//!     .parse(&NeverCancel)
//!     .unwrap();
//! assert_eq!(root.as_object().unwrap().len(), 1);
//! ```

/// Trait for input sources that can feed the tokenizer.
pub trait Reader {
    /// The error type returned by read operations
    type Error;

    /// Read data into the provided buffer.
    /// Returns the number of bytes read, or an error.
    ///
    /// # Contract
    /// - A return value of 0 **MUST** indicate true end of stream
    /// - Implementations **MUST NOT** return 0 unless no more data will ever be available
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<R: Reader + ?Sized> Reader for &mut R {
    type Error = R::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(buf)
    }
}

/// A [`Reader`] over a byte slice, optionally limited to fixed-size reads.
///
/// Use [`ChunkReader::full_slice()`] for resident input; the tokenizer's
/// scratch chunk is then the only limit on how much is scanned per refill.
/// [`ChunkReader::new()`] caps every read, which is handy for exercising
/// chunk boundaries.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk_size: usize,
}

impl<'a> ChunkReader<'a> {
    /// Create a reader returning at most `chunk_size` bytes per `read()` (minimum 1)
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Create a reader that hands out as much as the destination can take
    pub fn full_slice(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: usize::MAX,
        }
    }

    /// Total length of the underlying data
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Reader for ChunkReader<'_> {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = self.data.get(self.pos..).unwrap_or_default();
        let to_copy = remaining.len().min(buf.len()).min(self.chunk_size);
        if to_copy == 0 {
            return Ok(0);
        }

        match (buf.get_mut(..to_copy), remaining.get(..to_copy)) {
            (Some(dst), Some(src)) => dst.copy_from_slice(src),
            _ => return Err(()),
        }
        self.pos = self.pos.saturating_add(to_copy);
        Ok(to_copy)
    }
}

/// Adapter from [`std::io::Read`] to [`Reader`].
///
/// Interrupted reads are retried; any other I/O error surfaces as
/// [`ParseError::ReaderError`](crate::ParseError::ReaderError) and is kept
/// for inspection via [`IoReader::take_error`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoReader<R> {
    inner: R,
    last_error: Option<std::io::Error>,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            last_error: None,
        }
    }

    /// The I/O error behind the most recent failed read, if any
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Reader for IoReader<R> {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.inner.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::debug!("io reader failed: {e}");
                    self.last_error = Some(e);
                    return Err(());
                }
            }
        }
    }
}
