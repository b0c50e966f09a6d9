// SPDX-License-Identifier: Apache-2.0

use alloc::vec;

use crate::cancel::CancelToken;
use crate::chunk_reader::{ChunkReader, Reader};
use crate::node::{Document, Node};
use crate::parse_error::ParseError;
use crate::tokenizer::Tokenizer;
use crate::tree_builder::TreeBuilder;

/// Chunk size used by [`parse`], [`parse_bytes`] and [`parse_document`]
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default limit on container nesting
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// A skeleton parser over any [`Reader`].
///
/// The scratch buffer is borrowed for the parser's lifetime and bounds how
/// much input is held at once; the input can be arbitrarily larger. Parsing
/// consumes the parser, so a scratch buffer is never shared between parses.
///
/// # Example
/// ```
/// use skeljson::{ChunkReader, NeverCancel, SkeletonParser};
///
/// let text = r#"{"greeting": {"en": "Hello", "default": "Hi"}}"#;
/// let mut scratch = [0u8; 8];
/// let root = SkeletonParser::new(ChunkReader::full_slice(text.as_bytes()), &mut scratch)
///     .parse(&NeverCancel)
///     .unwrap();
///
/// let greeting = root.as_object().unwrap().get(text, "greeting").unwrap();
/// let en = greeting.as_object().unwrap().get(text, "en").unwrap();
/// assert_eq!(en.as_string().unwrap().resolve(text), Ok("Hello"));
/// ```
pub struct SkeletonParser<'b, R: Reader> {
    reader: R,
    scratch: &'b mut [u8],
    max_depth: usize,
}

impl<'b, R: Reader> SkeletonParser<'b, R> {
    /// Create a parser reading from `reader` through `scratch`
    pub fn new(reader: R, scratch: &'b mut [u8]) -> Self {
        Self {
            reader,
            scratch,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the container nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse one value from the input.
    ///
    /// Fails with [`ParseError::Cancelled`] as soon as `cancel` fires, and
    /// with the first structural error otherwise. Input after the first
    /// complete value is not examined.
    pub fn parse<C: CancelToken + ?Sized>(self, cancel: &C) -> Result<Node, ParseError> {
        if cancel.is_cancelled() {
            log::debug!("parse cancelled before start");
            return Err(ParseError::Cancelled);
        }
        log::debug!(
            "parse start: chunk {} bytes, max depth {}",
            self.scratch.len(),
            self.max_depth
        );

        let mut tokens = Tokenizer::new(self.reader, self.scratch, cancel);
        let result = TreeBuilder::new(&mut tokens, cancel, self.max_depth)
            .and_then(|builder| builder.build());
        match &result {
            Ok(_) => log::debug!("parse finished after {} bytes", tokens.consumed()),
            Err(e) => log::debug!("parse failed: {e}"),
        }
        result
    }
}

/// Parse raw bytes with a per-call scratch chunk.
pub fn parse_bytes<C: CancelToken + ?Sized>(input: &[u8], cancel: &C) -> Result<Node, ParseError> {
    // Small inputs do not need a full-size chunk
    let mut scratch = vec![0u8; input.len().clamp(1, DEFAULT_CHUNK_SIZE)];
    SkeletonParser::new(ChunkReader::full_slice(input), &mut scratch).parse(cancel)
}

/// Parse a text buffer into a tree of offsets into `input`.
///
/// ```
/// use skeljson::{parse, NeverCancel};
///
/// let text = r#"{"a":"1",,"b":"2",}"#;
/// let root = parse(text, &NeverCancel).unwrap();
/// let object = root.as_object().unwrap();
/// assert_eq!(object.len(), 2);
/// ```
pub fn parse<C: CancelToken + ?Sized>(input: &str, cancel: &C) -> Result<Node, ParseError> {
    parse_bytes(input.as_bytes(), cancel)
}

/// Parse a text buffer and keep the tree tied to it.
pub fn parse_document<'a, C: CancelToken + ?Sized>(
    input: &'a str,
    cancel: &C,
) -> Result<Document<'a>, ParseError> {
    parse(input, cancel).map(|root| Document::new(input, root))
}
