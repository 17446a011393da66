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

//! Error types for pattern compilation and search.

use thiserror::Error;
use trickle_core::LexError;
use trickle_stream::StreamError;

/// Errors from compiling a path pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A dot-separated component was empty, as in `a..b`.
    #[error("empty pattern component at position {position}")]
    EmptyComponent { position: usize },

    /// A component starting with `[` was not a well-formed index.
    #[error("invalid index component '{component}' at position {position}")]
    InvalidIndex { component: String, position: usize },
}

/// Errors from running a search.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The pattern string did not compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Traversal of the document failed.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl From<LexError> for QueryError {
    fn from(err: LexError) -> Self {
        Self::Stream(StreamError::Source(err))
    }
}

/// Result type for search operations.
pub type QueryResult<T> = Result<T, QueryError>;
