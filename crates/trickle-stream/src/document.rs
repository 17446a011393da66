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

//! Document-level entry point.
//!
//! A [`Document`] owns the cursor for one token stream and validates the
//! root before traversal starts: the stream must be non-empty and the
//! root must be a container. Scalar roots are rejected here because a
//! lazy traversal of a bare scalar has nothing to yield.

use crate::cursor::Cursor;
use crate::error::{StreamError, StreamResult};
use crate::reader::NodeReader;
use std::io::Read;
use trickle_core::{ContainerKind, JsonLexer, LexerConfig, TokenSource};

/// One traversable document over a token source.
///
/// # Examples
///
/// ```rust
/// use trickle_stream::Document;
/// use trickle_core::ContainerKind;
///
/// let mut doc = Document::open(r#"{"a": 1}"#.as_bytes())?;
/// assert_eq!(doc.kind(), ContainerKind::Object);
///
/// let mut root = doc.root()?;
/// let (key, value) = root.next_entry()?.unwrap();
/// assert_eq!(key.as_key(), Some("a"));
/// assert_eq!(value.materialize()?.as_int(), Some(1));
/// # Ok::<(), trickle_stream::StreamError>(())
/// ```
pub struct Document<S: TokenSource> {
    cursor: Cursor<S>,
    kind: ContainerKind,
    root_taken: bool,
}

impl<S: TokenSource> Document<S> {
    /// Wrap any token source, validating the root token.
    ///
    /// Fails with [`StreamError::EmptyDocument`] if the source yields no
    /// tokens, and with a structural error if the root is a scalar.
    pub fn from_source(source: S) -> StreamResult<Self> {
        let mut cursor = Cursor::new(source);
        let kind = match cursor.peek()? {
            None => return Err(StreamError::EmptyDocument),
            Some(token) => match token.container_start() {
                Some(kind) => kind,
                None => {
                    return Err(StreamError::structural(format!(
                        "document root must be an object or array, found {}",
                        token.describe()
                    )))
                }
            },
        };
        Ok(Self {
            cursor,
            kind,
            root_taken: false,
        })
    }

    /// The container kind of the document root.
    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Open a reader over the root container.
    ///
    /// The stream is forward-only, so the root can only be read once; a
    /// second call fails with a structural error.
    pub fn root(&mut self) -> StreamResult<NodeReader<'_, S>> {
        if self.root_taken {
            return Err(StreamError::structural("document root already consumed"));
        }
        self.root_taken = true;
        NodeReader::open(&mut self.cursor)
    }
}

impl<R: Read> Document<JsonLexer<R>> {
    /// Open a JSON document over any byte reader.
    pub fn open(reader: R) -> StreamResult<Self> {
        Self::from_source(JsonLexer::new(reader))
    }

    /// Open a JSON document with custom lexer limits.
    pub fn open_with_config(reader: R, config: LexerConfig) -> StreamResult<Self> {
        Self::from_source(JsonLexer::with_config(reader, config))
    }
}
