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

//! Error types for the streaming reader layer.

use thiserror::Error;
use trickle_core::LexError;

/// Errors produced while walking a token stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The underlying token source failed.
    #[error(transparent)]
    Source(#[from] LexError),

    /// The token sequence violated the nesting protocol.
    #[error("structural error: {message}")]
    Structural { message: String },

    /// The token source ended inside an open container.
    #[error("unexpected end of token stream inside an open container")]
    UnexpectedEof,

    /// The token source produced no tokens at all.
    #[error("empty document")]
    EmptyDocument,
}

impl StreamError {
    /// Create a structural error.
    #[inline]
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }
}

/// Result type for streaming traversal.
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use trickle_core::SourcePos;

    #[test]
    fn test_structural_constructor() {
        let err = StreamError::structural("key not followed by value");
        assert!(format!("{}", err).contains("key not followed by value"));
    }

    #[test]
    fn test_source_error_passthrough() {
        let lex = LexError::TrailingCharacters {
            pos: SourcePos::new(1, 3),
        };
        let err: StreamError = lex.into();
        assert!(format!("{}", err).contains("line 1, column 3"));
    }

    #[test]
    fn test_eof_display() {
        assert!(format!("{}", StreamError::UnexpectedEof).contains("end of token stream"));
    }

    #[test]
    fn test_empty_document_display() {
        assert_eq!(format!("{}", StreamError::EmptyDocument), "empty document");
    }
}
