// Dweve Trickle - Lazy Streaming JSON Traversal
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lazy node readers.
//!
//! A [`NodeReader`] walks the entries of one container without buffering
//! it. Each call to [`next_entry`](NodeReader::next_entry) yields one
//! `(key, value)` pair; nested containers come back as child readers
//! borrowing the same underlying cursor, so at most one entry's worth of
//! scalar data is held in memory at a time.
//!
//! Child readers do not have to be consumed. When the parent's
//! `next_entry` is called again, any tokens left over from an abandoned
//! child are read and discarded first, so the parent always lands on its
//! own next entry. Skipping is therefore free to write and costs only
//! the tokens skipped.
//!
//! # Examples
//!
//! ```rust
//! use trickle_stream::{Document, EntryKey, EntryValue};
//!
//! let mut doc = Document::open(r#"{"a": 1, "b": [true]}"#.as_bytes())?;
//! let mut root = doc.root()?;
//!
//! let (key, value) = root.next_entry()?.unwrap();
//! assert_eq!(key, EntryKey::Key("a".to_string()));
//! assert!(matches!(value, EntryValue::Scalar(_)));
//!
//! let (key, value) = root.next_entry()?.unwrap();
//! assert_eq!(key, EntryKey::Key("b".to_string()));
//! let nested = match value {
//!     EntryValue::Node(node) => node,
//!     other => panic!("expected a nested node, got {:?}", other),
//! };
//! let array = nested.materialize()?;
//! assert_eq!(array.get_index(0).and_then(|v| v.as_bool()), Some(true));
//!
//! assert!(root.next_entry()?.is_none());
//! # Ok::<(), trickle_stream::StreamError>(())
//! ```

use crate::cursor::Cursor;
use crate::error::{StreamError, StreamResult};
use trickle_core::{ContainerKind, Scalar, Token, TokenSource, Value};

/// How a reader hands out nested containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Nested containers come back as child readers. Children inherit
    /// lazy mode.
    Lazy,
    /// Nested containers are materialized into [`Value`] trees before
    /// the entry is returned. Children are materialized recursively.
    Eager,
    /// No mode chosen yet. Behaves like [`Mode::Lazy`] for the entries
    /// it yields, and children start unset so each can decide for
    /// itself. This is the initial mode of every reader.
    #[default]
    Unset,
}

/// The key half of an entry: a member name in objects, a position in
/// arrays.
///
/// Array indices are dense: 0, 1, 2, ... in document order, assigned as
/// entries are yielded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    /// Object member name.
    Key(String),
    /// Array element position.
    Index(usize),
}

impl EntryKey {
    /// The member name, if this is an object key.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k),
            Self::Index(_) => None,
        }
    }

    /// The element position, if this is an array index.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Key(_) => None,
        }
    }
}

impl std::fmt::Display for EntryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(k) => write!(f, "{}", k),
            Self::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// The value half of an entry.
pub enum EntryValue<'a, S: TokenSource> {
    /// A leaf value, already decoded.
    Scalar(Scalar),
    /// A nested container, not yet read. Consume it, materialize it, or
    /// drop it; the parent reclaims the stream either way.
    Node(NodeReader<'a, S>),
    /// A nested container read into memory by an eager parent.
    Materialized(Value),
}

impl<S: TokenSource> EntryValue<'_, S> {
    /// Turn this entry value into a plain [`Value`], consuming any
    /// remaining stream content it covers.
    pub fn materialize(self) -> StreamResult<Value> {
        match self {
            Self::Scalar(scalar) => Ok(Value::from(scalar)),
            Self::Node(reader) => reader.materialize(),
            Self::Materialized(value) => Ok(value),
        }
    }

    /// The scalar, if this entry is a leaf.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Check if this entry is a nested container reader.
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

impl<S: TokenSource> std::fmt::Debug for EntryValue<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            Self::Node(reader) => f.debug_tuple("Node").field(reader).finish(),
            Self::Materialized(value) => f.debug_tuple("Materialized").field(value).finish(),
        }
    }
}

/// Streaming reader over the entries of one container.
///
/// Created by [`Document::root`](crate::Document::root) for the top
/// level, or yielded by a parent reader for nested containers. The
/// reader does not implement [`Iterator`] because each yielded entry
/// borrows the reader; call [`next_entry`](Self::next_entry) in a
/// `while let` loop instead.
pub struct NodeReader<'a, S: TokenSource> {
    cursor: &'a mut Cursor<S>,
    kind: ContainerKind,
    /// Cursor depth just after this reader's start token. The reader's
    /// own entries live at this depth.
    depth: usize,
    mode: Mode,
    next_index: usize,
    done: bool,
}

impl<'a, S: TokenSource> NodeReader<'a, S> {
    /// Open a reader on the container starting at the cursor position.
    ///
    /// Consumes the start token. Fails with a structural error if the
    /// next token does not open a container.
    pub fn open(cursor: &'a mut Cursor<S>) -> StreamResult<Self> {
        match cursor.next()? {
            Some(token) => match token.container_start() {
                Some(kind) => Ok(Self {
                    depth: cursor.depth(),
                    kind,
                    cursor,
                    mode: Mode::Unset,
                    next_index: 0,
                    done: false,
                }),
                None => Err(StreamError::structural(format!(
                    "expected container start, found {}",
                    token.describe()
                ))),
            },
            None => Err(StreamError::UnexpectedEof),
        }
    }

    /// Open a reader, additionally checking the container kind.
    ///
    /// Like [`open`](Self::open), but fails with a structural error if
    /// the container is not of `expected` kind.
    pub fn open_expecting(
        cursor: &'a mut Cursor<S>,
        expected: ContainerKind,
    ) -> StreamResult<Self> {
        let reader = Self::open(cursor)?;
        if reader.kind != expected {
            return Err(StreamError::structural(format!(
                "expected {} start, found {} start",
                expected, reader.kind
            )));
        }
        Ok(reader)
    }

    /// Whether this reader walks an object or an array.
    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// The current traversal mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Set the traversal mode. Takes effect from the next entry.
    #[inline]
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Set the traversal mode, builder style.
    #[inline]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Yield the next entry, or `None` once the container is exhausted.
    ///
    /// Reclaims the stream from any partially consumed child reader
    /// first. After `None` is returned once, every later call returns
    /// `None` without touching the stream.
    pub fn next_entry(&mut self) -> StreamResult<Option<(EntryKey, EntryValue<'_, S>)>> {
        if self.done {
            return Ok(None);
        }
        self.cursor.close_to(self.depth)?;
        let token = match self.cursor.next()? {
            Some(token) => token,
            None => return Err(StreamError::UnexpectedEof),
        };
        match self.kind {
            ContainerKind::Object => match token {
                Token::ObjectEnd => {
                    self.done = true;
                    Ok(None)
                }
                Token::Key(key) => {
                    let value_token = match self.cursor.next()? {
                        Some(token) => token,
                        None => return Err(StreamError::UnexpectedEof),
                    };
                    let value = self.enter_value(value_token)?;
                    Ok(Some((EntryKey::Key(key), value)))
                }
                other => Err(StreamError::structural(format!(
                    "expected key or object end, found {}",
                    other.describe()
                ))),
            },
            ContainerKind::Array => match token {
                Token::ArrayEnd => {
                    self.done = true;
                    Ok(None)
                }
                Token::Key(_) | Token::ObjectEnd => Err(StreamError::structural(format!(
                    "expected value or array end, found {}",
                    token.describe()
                ))),
                token => {
                    let index = self.next_index;
                    self.next_index += 1;
                    let value = self.enter_value(token)?;
                    Ok(Some((EntryKey::Index(index), value)))
                }
            },
        }
    }

    /// Build an entry value from an already consumed value token.
    fn enter_value(&mut self, token: Token) -> StreamResult<EntryValue<'_, S>> {
        if let Token::Scalar(scalar) = token {
            return Ok(EntryValue::Scalar(scalar));
        }
        let kind = match token.container_start() {
            Some(kind) => kind,
            None => {
                return Err(StreamError::structural(format!(
                    "expected value, found {}",
                    token.describe()
                )))
            }
        };
        let child_mode = self.mode;
        let child = NodeReader {
            depth: self.cursor.depth(),
            kind,
            cursor: &mut *self.cursor,
            // Children inherit the parent's mode; Unset stays Unset.
            mode: child_mode,
            next_index: 0,
            done: false,
        };
        if child_mode == Mode::Eager {
            Ok(EntryValue::Materialized(child.materialize()?))
        } else {
            Ok(EntryValue::Node(child))
        }
    }

    /// Read the rest of this container into a plain [`Value`].
    ///
    /// Entries already yielded are not included; materializing midway
    /// captures only what remains.
    pub fn materialize(mut self) -> StreamResult<Value> {
        self.mode = Mode::Eager;
        match self.kind {
            ContainerKind::Object => {
                let mut members = Vec::new();
                while let Some((key, value)) = self.next_entry()? {
                    let value = value.materialize()?;
                    // Object readers only yield keyed entries.
                    if let EntryKey::Key(k) = key {
                        members.push((k, value));
                    }
                }
                Ok(Value::Object(members))
            }
            ContainerKind::Array => {
                let mut items = Vec::new();
                while let Some((_, value)) = self.next_entry()? {
                    items.push(value.materialize()?);
                }
                Ok(Value::Array(items))
            }
        }
    }

    /// Skip the rest of this container, consuming its remaining tokens.
    ///
    /// After draining, the reader is exhausted and the stream sits just
    /// past this container's end token.
    pub fn drain(&mut self) -> StreamResult<()> {
        if self.done {
            return Ok(());
        }
        self.cursor.close_to(self.depth - 1)?;
        self.done = true;
        Ok(())
    }

    /// Check if the container has been fully consumed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<S: TokenSource> std::fmt::Debug for NodeReader<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeReader")
            .field("kind", &self.kind)
            .field("depth", &self.depth)
            .field("mode", &self.mode)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
