// SPDX-License-Identifier: Apache-2.0

use crate::token::TokenKind;

/// Errors that can occur while building a skeleton tree.
///
/// Every variant is fatal to the parse that raised it. Offsets are absolute
/// byte offsets into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// An opening quote was not followed by a closing quote.
    /// `found` is the offset of the token seen instead, or the input length
    /// if the input ended.
    UnterminatedString { open: usize, found: usize },
    /// Inside an object, the next token is neither a key nor `}`.
    MissingObjectKey { object: usize },
    /// An object key parsed to something other than a string.
    ObjectKeyNotString { object: usize },
    /// An object key was not followed by `:`, including when the input ends
    /// right after the key.
    MissingColon { object: usize },
    /// A value was expected but this token appeared.
    UnexpectedToken { kind: TokenKind, offset: usize },
    /// The input ended where more structure was required.
    UnexpectedEnd { offset: usize },
    /// Containers are nested deeper than the configured limit.
    MaxDepthExceeded { offset: usize, max_depth: usize },
    /// The cancellation signal fired.
    Cancelled,
    /// Error from the underlying reader
    ReaderError,
    /// The chunk buffer handed to the tokenizer has no room.
    EmptyScratchBuffer,
    /// A span does not fit the buffer it is resolved against.
    InvalidSliceBounds { start: usize, len: usize },
}

impl ParseError {
    /// The primary offset this error points at, if it has one
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ParseError::UnterminatedString { open, .. } => Some(open),
            ParseError::MissingObjectKey { object }
            | ParseError::ObjectKeyNotString { object }
            | ParseError::MissingColon { object } => Some(object),
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::UnexpectedEnd { offset }
            | ParseError::MaxDepthExceeded { offset, .. } => Some(offset),
            ParseError::InvalidSliceBounds { start, .. } => Some(start),
            ParseError::Cancelled | ParseError::ReaderError | ParseError::EmptyScratchBuffer => {
                None
            }
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::UnterminatedString { open, found } => {
                write!(f, "String not closed. Start({open}) Current({found})")
            }
            ParseError::MissingObjectKey { object } => {
                write!(f, "Object key not found. Index({object})")
            }
            ParseError::ObjectKeyNotString { object } => {
                write!(f, "Object key is not a string. Index({object})")
            }
            ParseError::MissingColon { object } => {
                write!(f, "Object colon not found. Index({object})")
            }
            ParseError::UnexpectedToken { kind, offset } => {
                write!(f, "Invalid token '{}'. Index({offset})", kind.as_char())
            }
            ParseError::UnexpectedEnd { offset } => {
                write!(f, "Unexpected end of input. Index({offset})")
            }
            ParseError::MaxDepthExceeded { offset, max_depth } => {
                write!(f, "Nesting deeper than {max_depth}. Index({offset})")
            }
            ParseError::InvalidSliceBounds { start, len } => {
                write!(f, "Span out of bounds. Start({start}) Length({len})")
            }
            _ => write!(f, "{self:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
