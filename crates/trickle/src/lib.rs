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

//! Lazy, memory-bounded JSON traversal.
//!
//! Trickle reads JSON documents as a stream of nested readers instead
//! of building a tree: each container yields its entries one at a time,
//! nested containers come back as child readers, and anything you do
//! not read is skipped at the token level. Memory use stays bounded by
//! nesting depth, whatever the document size.
//!
//! # Walking a document
//!
//! ```rust
//! use trickle::EntryValue;
//!
//! let data = r#"{"users": [{"name": "ada"}, {"name": "grace"}]}"#;
//! let mut doc = trickle::open(data.as_bytes())?;
//! let mut root = doc.root()?;
//!
//! while let Some((key, value)) = root.next_entry()? {
//!     assert_eq!(key.as_key(), Some("users"));
//!     if let EntryValue::Node(users) = value {
//!         let users = users.materialize()?;
//!         assert_eq!(users.as_array().map(|a| a.len()), Some(2));
//!     }
//! }
//! # Ok::<(), trickle::StreamError>(())
//! ```
//!
//! # Searching by path pattern
//!
//! ```rust
//! let data = r#"{"users": [{"name": "ada"}, {"name": "grace"}]}"#;
//! let matches = trickle::search(data.as_bytes(), "users.*.name")?;
//!
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[1].value.as_str(), Some("grace"));
//! assert_eq!(matches[1].path_string(), "users.[1].name");
//! # Ok::<(), trickle::QueryError>(())
//! ```
//!
//! The crate is a facade over three layers: `trickle-core` (tokens and
//! the JSON lexer), `trickle-stream` (lazy readers), and `trickle-query`
//! (path patterns and search). Everything needed for everyday use is
//! re-exported here.

use std::io::Read;

pub use trickle_core::{
    ContainerKind, JsonLexer, LexError, LexResult, LexerConfig, MemorySource, Scalar, SourcePos,
    Token, TokenSource, Value,
};
pub use trickle_query::{
    search, search_source, search_with, Component, Match, Pattern, PatternError, QueryError,
    QueryResult,
};
pub use trickle_stream::{
    Cursor, Document, EntryKey, EntryValue, Mode, NodeReader, StreamError, StreamResult,
};

/// Open a JSON document over any byte reader.
///
/// Shorthand for [`Document::open`].
pub fn open<R: Read>(reader: R) -> StreamResult<Document<JsonLexer<R>>> {
    Document::open(reader)
}

/// Open a JSON document with custom lexer limits.
pub fn open_with_config<R: Read>(
    reader: R,
    config: LexerConfig,
) -> StreamResult<Document<JsonLexer<R>>> {
    Document::open_with_config(reader, config)
}

/// Compile a path pattern string.
///
/// Shorthand for `pattern.parse::<Pattern>()`, useful when a pattern is
/// reused across several searches.
pub fn compile(pattern: &str) -> Result<Pattern, PatternError> {
    pattern.parse()
}
