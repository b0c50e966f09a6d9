// SPDX-License-Identifier: Apache-2.0

//! Parse tree types.
//!
//! Nodes carry offsets, never text. A [`StringSpan`] is resolved against the
//! buffer it was parsed from only when the caller asks for it.

use alloc::string::String;
use alloc::vec::Vec;

use crate::parse_error::ParseError;

/// Byte range of a string literal's content, quotes excluded.
///
/// The content is kept verbatim: an escaped quote resolves to `\"`, not `"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringSpan {
    start: usize,
    len: usize,
}

impl StringSpan {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Offset of the first content byte (one past the opening quote)
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset one past the last content byte (the closing quote)
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// Borrow the content from the text this span was parsed from.
    ///
    /// Fails if the span does not fit `text` or does not fall on `char`
    /// boundaries, which can only happen when resolving against a different
    /// buffer.
    pub fn resolve<'a>(&self, text: &'a str) -> Result<&'a str, ParseError> {
        text.get(self.start..self.end())
            .ok_or(ParseError::InvalidSliceBounds {
                start: self.start,
                len: self.len,
            })
    }

    /// Borrow the raw content bytes
    pub fn resolve_bytes<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8], ParseError> {
        bytes
            .get(self.start..self.end())
            .ok_or(ParseError::InvalidSliceBounds {
                start: self.start,
                len: self.len,
            })
    }

    /// Copy the content out into an owned string
    pub fn to_owned_string(&self, text: &str) -> Result<String, ParseError> {
        self.resolve(text).map(String::from)
    }
}

/// Ordered object entries. Duplicate keys are kept in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    entries: Vec<(StringSpan, Node)>,
}

impl Object {
    pub(crate) fn from_entries(entries: Vec<(StringSpan, Node)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(StringSpan, Node)] {
        &self.entries
    }

    pub fn iter(&self) -> core::slice::Iter<'_, (StringSpan, Node)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value whose key resolves to `key` in `text`.
    ///
    /// Keys are compared verbatim, without unescaping.
    pub fn get(&self, text: &str, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k.resolve(text) == Ok(key))
            .map(|(_, v)| v)
    }

    /// Every value whose key resolves to `key`, in input order
    pub fn get_all<'s>(&'s self, text: &'s str, key: &'s str) -> impl Iterator<Item = &'s Node> {
        self.entries
            .iter()
            .filter(move |(k, _)| k.resolve(text) == Ok(key))
            .map(|(_, v)| v)
    }
}

impl<'s> IntoIterator for &'s Object {
    type Item = &'s (StringSpan, Node);
    type IntoIter = core::slice::Iter<'s, (StringSpan, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ordered array items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Array {
    items: Vec<Node>,
}

impl Array {
    pub(crate) fn from_items(items: Vec<Node>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Node> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'s> IntoIterator for &'s Array {
    type Item = &'s Node;
    type IntoIter = core::slice::Iter<'s, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A node of the skeleton tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A string literal, as a span into the input
    String(StringSpan),
    /// An object (e.g., `{"k": "v"}`)
    Object(Object),
    /// An array (e.g., `["a", "b"]`)
    Array(Array),
    /// A value slot filled by a bare `,` (e.g., `{"k":,}`)
    Empty,
}

impl Node {
    pub fn as_string(&self) -> Option<StringSpan> {
        match self {
            Node::String(span) => Some(*span),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn is_empty_slot(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Visit every string span below this node, keys included, depth-first
    /// in input order.
    pub fn for_each_string<F: FnMut(StringSpan)>(&self, mut f: F) {
        self.visit_strings(&mut f);
    }

    fn visit_strings<F: FnMut(StringSpan)>(&self, f: &mut F) {
        match self {
            Node::String(span) => f(*span),
            Node::Object(object) => {
                for (key, value) in object {
                    f(*key);
                    value.visit_strings(f);
                }
            }
            Node::Array(array) => {
                for item in array {
                    item.visit_strings(f);
                }
            }
            Node::Empty => {}
        }
    }
}

/// A parse tree together with the text it was parsed from.
///
/// Spans from [`Document::root`] can be resolved without passing the text
/// around separately, and the tree cannot outlive its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    text: &'a str,
    root: Node,
}

impl<'a> Document<'a> {
    pub fn new(text: &'a str, root: Node) -> Self {
        Self { text, root }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn resolve(&self, span: StringSpan) -> Result<&'a str, ParseError> {
        span.resolve(self.text)
    }
}
