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

//! Shared forward-only position over a token source.
//!
//! All readers for one document borrow the same [`Cursor`]. The cursor
//! tracks the current container depth as tokens are consumed, which is
//! what lets an outer reader reclaim the stream from an abandoned inner
//! reader: [`close_to`](Cursor::close_to) consumes tokens until the
//! depth drops back to the outer reader's level.

use crate::error::{StreamError, StreamResult};
use trickle_core::{Token, TokenSource};

/// Single owner of the read position within a token stream.
pub struct Cursor<S: TokenSource> {
    source: S,
    peeked: Option<Token>,
    depth: usize,
}

impl<S: TokenSource> Cursor<S> {
    /// Wrap a token source at depth zero.
    pub fn new(source: S) -> Self {
        Self {
            source,
            peeked: None,
            depth: 0,
        }
    }

    /// The number of containers currently open at the read position.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> StreamResult<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self.source.next_token()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Consume and return the next token, updating the depth.
    pub fn next(&mut self) -> StreamResult<Option<Token>> {
        let token = match self.peeked.take() {
            Some(token) => Some(token),
            None => self.source.next_token()?,
        };
        if let Some(token) = &token {
            if token.container_start().is_some() {
                self.depth += 1;
            } else if let Some(kind) = token.container_end() {
                if self.depth == 0 {
                    return Err(StreamError::structural(format!(
                        "unmatched {} end",
                        kind
                    )));
                }
                self.depth -= 1;
            }
        }
        Ok(token)
    }

    /// Consume tokens until the depth drops to `target`.
    ///
    /// This is the reclaim step: any nested content the caller skipped
    /// is read and discarded so the position lands just past it.
    pub fn close_to(&mut self, target: usize) -> StreamResult<()> {
        while self.depth > target {
            if self.next()?.is_none() {
                return Err(StreamError::UnexpectedEof);
            }
        }
        Ok(())
    }
}
