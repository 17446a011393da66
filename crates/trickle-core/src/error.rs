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

//! Error types for tokenization.
//!
//! Every lexical error carries a [`SourcePos`] pointing at the offending
//! byte so callers can report exactly where a document went wrong. I/O
//! failures from the underlying reader are wrapped unchanged.

use thiserror::Error;

/// A position in the input, 1-based.
///
/// Columns count bytes, not characters: multibyte UTF-8 content
/// advances the column by its encoded length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourcePos {
    line: usize,
    column: usize,
}

impl SourcePos {
    /// Create a position from 1-based line and column numbers.
    #[inline]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The 1-based line number.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The 1-based column number, in bytes.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl std::fmt::Display for SourcePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors produced while turning bytes into tokens.
///
/// # Examples
///
/// ```rust
/// use trickle_core::{LexError, SourcePos};
///
/// let err = LexError::UnexpectedCharacter {
///     found: 'x',
///     expected: "value",
///     pos: SourcePos::new(3, 14),
/// };
/// assert_eq!(err.pos(), Some(SourcePos::new(3, 14)));
/// assert!(format!("{}", err).contains("line 3, column 14"));
/// ```
#[derive(Debug, Error)]
pub enum LexError {
    /// IO error from the underlying byte source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// String content is not valid UTF-8.
    #[error("{pos}: invalid UTF-8 in string")]
    Utf8 { pos: SourcePos },

    /// A character that does not fit the grammar at this point.
    #[error("{pos}: unexpected character '{found}', expected {expected}")]
    UnexpectedCharacter {
        found: char,
        expected: &'static str,
        pos: SourcePos,
    },

    /// Input ended in the middle of a token or an open container.
    #[error("{pos}: unexpected end of input, expected {expected}")]
    UnexpectedEof {
        expected: &'static str,
        pos: SourcePos,
    },

    /// Raw control character inside a string.
    #[error("{pos}: unescaped control character 0x{byte:02x} in string")]
    UnescapedControl { byte: u8, pos: SourcePos },

    /// Malformed escape sequence.
    #[error("{pos}: invalid escape: {message}")]
    InvalidEscape { message: String, pos: SourcePos },

    /// Number literal that does not follow the JSON grammar.
    #[error("{pos}: invalid number '{literal}'")]
    InvalidNumber { literal: String, pos: SourcePos },

    /// Keyword literal other than true/false/null.
    #[error("{pos}: invalid literal '{literal}'")]
    InvalidLiteral { literal: String, pos: SourcePos },

    /// Non-whitespace content after the top-level value.
    #[error("{pos}: unexpected trailing characters after document")]
    TrailingCharacters { pos: SourcePos },

    /// Nesting depth exceeded the configured limit.
    #[error("{pos}: nesting depth {depth} exceeds maximum {max}")]
    DepthLimitExceeded {
        depth: usize,
        max: usize,
        pos: SourcePos,
    },

    /// String length exceeded the configured limit.
    #[error("{pos}: string length {length} exceeds maximum {max}")]
    StringTooLong {
        length: usize,
        max: usize,
        pos: SourcePos,
    },
}

impl LexError {
    /// Create an escape error.
    #[inline]
    pub fn escape(pos: SourcePos, message: impl Into<String>) -> Self {
        Self::InvalidEscape {
            message: message.into(),
            pos,
        }
    }

    /// Get the source position if available.
    #[inline]
    pub fn pos(&self) -> Option<SourcePos> {
        match self {
            Self::Utf8 { pos }
            | Self::UnexpectedCharacter { pos, .. }
            | Self::UnexpectedEof { pos, .. }
            | Self::UnescapedControl { pos, .. }
            | Self::InvalidEscape { pos, .. }
            | Self::InvalidNumber { pos, .. }
            | Self::InvalidLiteral { pos, .. }
            | Self::TrailingCharacters { pos }
            | Self::DepthLimitExceeded { pos, .. }
            | Self::StringTooLong { pos, .. } => Some(*pos),
            Self::Io(_) => None,
        }
    }

    /// Get the 1-based line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        self.pos().map(|p| p.line())
    }
}

/// Result type for tokenization.
pub type LexResult<T> = Result<T, LexError>;
