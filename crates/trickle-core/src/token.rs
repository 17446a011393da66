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

//! Structural tokens and the token source contract.
//!
//! A document is consumed as a flat sequence of [`Token`]s in exactly the
//! order a depth-first walk would visit start, leaf, and end events:
//!
//! ```text
//! {"users": [1, 2]}
//! ```
//!
//! tokenizes to
//!
//! ```text
//! ObjectStart
//! Key("users")
//! ArrayStart
//! Scalar(Int(1))
//! Scalar(Int(2))
//! ArrayEnd
//! ObjectEnd
//! ```
//!
//! Anything that can produce such a sequence, one token per pull, can act
//! as a [`TokenSource`] for the reader layer. The in-tree producer is
//! [`JsonLexer`](crate::JsonLexer); [`MemorySource`] serves tests and
//! custom pipelines.

use crate::error::LexResult;

/// The two container shapes a document can nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// A JSON object (`{...}`), yielding keyed children.
    Object,
    /// A JSON array (`[...]`), yielding indexed children.
    Array,
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Object => write!(f, "object"),
            Self::Array => write!(f, "array"),
        }
    }
}

/// A leaf value as it appears in the token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Null literal.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// String value.
    String(String),
}

impl Scalar {
    /// Returns true if this scalar is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get the scalar as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the scalar as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the scalar as a float. Integers convert.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to get the scalar as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One structural event from a token source.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Start of an object.
    ObjectStart,
    /// End of an object.
    ObjectEnd,
    /// Start of an array.
    ArrayStart,
    /// End of an array.
    ArrayEnd,
    /// An object member key. Always immediately followed by the member's
    /// value token in a well-formed stream.
    Key(String),
    /// A leaf value.
    Scalar(Scalar),
}

impl Token {
    /// The container kind if this token opens a container.
    #[inline]
    pub fn container_start(&self) -> Option<ContainerKind> {
        match self {
            Self::ObjectStart => Some(ContainerKind::Object),
            Self::ArrayStart => Some(ContainerKind::Array),
            _ => None,
        }
    }

    /// The container kind if this token closes a container.
    #[inline]
    pub fn container_end(&self) -> Option<ContainerKind> {
        match self {
            Self::ObjectEnd => Some(ContainerKind::Object),
            Self::ArrayEnd => Some(ContainerKind::Array),
            _ => None,
        }
    }

    /// Check if this is a scalar token.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Short token name for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ObjectStart => "object start",
            Self::ObjectEnd => "object end",
            Self::ArrayStart => "array start",
            Self::ArrayEnd => "array end",
            Self::Key(_) => "key",
            Self::Scalar(_) => "scalar",
        }
    }
}

/// A pull-based, single-pass producer of structural tokens.
///
/// Implementations must yield tokens in document order with correctly
/// nested container balancing. The reader layer detects violations and
/// reports them as structural errors; it never repairs a broken stream.
pub trait TokenSource {
    /// Produce the next token, or `None` at the end of the document.
    fn next_token(&mut self) -> LexResult<Option<Token>>;
}

/// A token source backed by an in-memory token sequence.
///
/// Useful in tests and for feeding the reader layer from producers other
/// than the JSON lexer.
///
/// # Examples
///
/// ```rust
/// use trickle_core::{MemorySource, Scalar, Token, TokenSource};
///
/// let mut source = MemorySource::new(vec![
///     Token::ArrayStart,
///     Token::Scalar(Scalar::Int(1)),
///     Token::ArrayEnd,
/// ]);
/// assert_eq!(source.next_token().unwrap(), Some(Token::ArrayStart));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tokens: std::collections::VecDeque<Token>,
}

impl MemorySource {
    /// Create a source over the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }
}

impl From<Vec<Token>> for MemorySource {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl TokenSource for MemorySource {
    fn next_token(&mut self) -> LexResult<Option<Token>> {
        Ok(self.tokens.pop_front())
    }
}
