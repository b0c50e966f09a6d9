// SPDX-License-Identifier: Apache-2.0

//! A structural JSON skeleton parser.
//!
//! `skeljson` extracts only the skeleton of a JSON document: objects, arrays
//! and string literals. Strings come back as [`StringSpan`]s, byte offsets
//! into the original input, and are only turned into text when the caller
//! resolves them. Numbers, booleans, `null` and whitespace are invisible.
//!
//! The parser is deliberately lenient about separators: stray, doubled and
//! trailing commas are accepted, and a comma where a value belongs yields
//! [`Node::Empty`].
//!
//! ```
//! use skeljson::{parse_document, NeverCancel};
//!
//! let doc = parse_document(r#"{"hello": {"en": "Hello", "ja": "Konnichiwa"}}"#, &NeverCancel)
//!     .unwrap();
//! for (key, value) in doc.root().as_object().unwrap() {
//!     assert_eq!(doc.resolve(*key), Ok("hello"));
//!     assert_eq!(value.as_object().unwrap().len(), 2);
//! }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod cancel;
pub use cancel::{CancelToken, NeverCancel};

mod chunk_reader;
#[cfg(feature = "std")]
pub use chunk_reader::IoReader;
pub use chunk_reader::{ChunkReader, Reader};

mod node;
pub use node::{Array, Document, Node, Object, StringSpan};

mod parse_error;
pub use parse_error::ParseError;

mod parser;
pub use parser::{
    parse, parse_bytes, parse_document, SkeletonParser, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_DEPTH,
};

mod token;
pub use token::{Token, TokenKind};

mod tokenizer;
pub use tokenizer::Tokenizer;

mod tree_builder;
