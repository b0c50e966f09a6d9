// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent tree builder over the structural token stream.

use alloc::vec::Vec;

use crate::cancel::CancelToken;
use crate::chunk_reader::Reader;
use crate::node::{Array, Node, Object, StringSpan};
use crate::parse_error::ParseError;
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

/// One-token lookahead over a [`Tokenizer`]
struct TokenCursor<'t, 'b, 'c, R: Reader, C: CancelToken + ?Sized> {
    tokens: &'t mut Tokenizer<'b, 'c, R, C>,
    current: Option<Token>,
}

impl<'t, 'b, 'c, R: Reader, C: CancelToken + ?Sized> TokenCursor<'t, 'b, 'c, R, C> {
    fn new(tokens: &'t mut Tokenizer<'b, 'c, R, C>) -> Result<Self, ParseError> {
        let current = tokens.next_token()?;
        Ok(Self { tokens, current })
    }

    fn peek(&self) -> Option<Token> {
        self.current
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.tokens.next_token()?;
        Ok(())
    }

    /// Return the current token and move past it
    fn take(&mut self) -> Result<Option<Token>, ParseError> {
        let token = self.current;
        self.advance()?;
        Ok(token)
    }

    /// Offset reported when the input runs out
    fn end_offset(&self) -> usize {
        self.tokens.consumed()
    }
}

/// Builds a [`Node`] tree from a token stream
pub(crate) struct TreeBuilder<'t, 'b, 'c, R: Reader, C: CancelToken + ?Sized> {
    cursor: TokenCursor<'t, 'b, 'c, R, C>,
    cancel: &'c C,
    max_depth: usize,
}

impl<'t, 'b, 'c, R: Reader, C: CancelToken + ?Sized> TreeBuilder<'t, 'b, 'c, R, C> {
    pub(crate) fn new(
        tokens: &'t mut Tokenizer<'b, 'c, R, C>,
        cancel: &'c C,
        max_depth: usize,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            cursor: TokenCursor::new(tokens)?,
            cancel,
            max_depth,
        })
    }

    /// Parse exactly one value starting at the current token
    pub(crate) fn build(mut self) -> Result<Node, ParseError> {
        self.parse_value(0)
    }

    fn check_cancel(&self) -> Result<(), ParseError> {
        if self.cancel.is_cancelled() {
            log::debug!("tree builder cancelled");
            return Err(ParseError::Cancelled);
        }
        Ok(())
    }

    fn unexpected_end(&self) -> ParseError {
        ParseError::UnexpectedEnd {
            offset: self.cursor.end_offset(),
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Node, ParseError> {
        self.check_cancel()?;
        let token = match self.cursor.take()? {
            Some(token) => token,
            None => return Err(self.unexpected_end()),
        };

        match token.kind {
            TokenKind::Quote => self.parse_string(token).map(Node::String),
            TokenKind::ObjectStart => {
                self.enter(token, depth)?;
                self.parse_object(token, depth + 1).map(Node::Object)
            }
            TokenKind::ArrayStart => {
                self.enter(token, depth)?;
                self.parse_array(depth + 1).map(Node::Array)
            }
            // A separator where a value belongs fills the slot
            TokenKind::Comma => Ok(Node::Empty),
            kind => Err(ParseError::UnexpectedToken {
                kind,
                offset: token.offset,
            }),
        }
    }

    fn enter(&self, token: Token, depth: usize) -> Result<(), ParseError> {
        if depth >= self.max_depth {
            return Err(ParseError::MaxDepthExceeded {
                offset: token.offset,
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }

    fn parse_string(&mut self, open: Token) -> Result<StringSpan, ParseError> {
        let close = match self.cursor.take()? {
            Some(token) if token.kind == TokenKind::Quote => token,
            Some(token) => {
                return Err(ParseError::UnterminatedString {
                    open: open.offset,
                    found: token.offset,
                })
            }
            None => {
                return Err(ParseError::UnterminatedString {
                    open: open.offset,
                    found: self.cursor.end_offset(),
                })
            }
        };
        let start = open.offset + 1;
        Ok(StringSpan::new(start, close.offset - start))
    }

    fn parse_object(&mut self, open: Token, depth: usize) -> Result<Object, ParseError> {
        let object = open.offset;
        let mut entries = Vec::new();
        loop {
            self.check_cancel()?;
            let peek = self.cursor.peek().ok_or_else(|| self.unexpected_end())?;
            match peek.kind {
                TokenKind::Comma => {
                    self.cursor.advance()?;
                    continue;
                }
                TokenKind::ObjectEnd => {
                    self.cursor.advance()?;
                    break;
                }
                TokenKind::Quote => {}
                _ => return Err(ParseError::MissingObjectKey { object }),
            }

            let key = match self.parse_value(depth)? {
                Node::String(span) => span,
                _ => return Err(ParseError::ObjectKeyNotString { object }),
            };
            match self.cursor.take()? {
                Some(token) if token.kind == TokenKind::Colon => {}
                _ => return Err(ParseError::MissingColon { object }),
            }
            let value = self.parse_value(depth)?;
            entries.push((key, value));
        }
        Ok(Object::from_entries(entries))
    }

    fn parse_array(&mut self, depth: usize) -> Result<Array, ParseError> {
        let mut items = Vec::new();
        loop {
            self.check_cancel()?;
            let peek = self.cursor.peek().ok_or_else(|| self.unexpected_end())?;
            match peek.kind {
                TokenKind::Comma => {
                    self.cursor.advance()?;
                    continue;
                }
                TokenKind::ArrayEnd => {
                    self.cursor.advance()?;
                    break;
                }
                _ => {}
            }
            items.push(self.parse_value(depth)?);
        }
        Ok(Array::from_items(items))
    }
}
