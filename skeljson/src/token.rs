// SPDX-License-Identifier: Apache-2.0

/// Structural marker kinds recognized by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `"`, both opening and closing a string literal
    Quote,
    /// `:`
    Colon,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Map a byte outside of a string literal to its token kind.
    /// Anything that is not structural yields `None`.
    pub(crate) fn from_structural(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(TokenKind::ObjectStart),
            b'}' => Some(TokenKind::ObjectEnd),
            b'[' => Some(TokenKind::ArrayStart),
            b']' => Some(TokenKind::ArrayEnd),
            b'"' => Some(TokenKind::Quote),
            b':' => Some(TokenKind::Colon),
            b',' => Some(TokenKind::Comma),
            _ => None,
        }
    }

    /// The character this token stands for
    pub fn as_char(self) -> char {
        match self {
            TokenKind::ObjectStart => '{',
            TokenKind::ObjectEnd => '}',
            TokenKind::ArrayStart => '[',
            TokenKind::ArrayEnd => ']',
            TokenKind::Quote => '"',
            TokenKind::Colon => ':',
            TokenKind::Comma => ',',
        }
    }
}

/// A structural token and its absolute byte offset in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}
