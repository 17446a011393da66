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

//! Core token model for trickle.
//!
//! This crate holds everything the traversal layers build on:
//!
//! - [`Token`] and [`Scalar`]: the flat structural event stream a JSON
//!   document decomposes into.
//! - [`TokenSource`]: the pull contract between a tokenizer and a reader.
//! - [`JsonLexer`]: the incremental JSON tokenizer, with resource limits
//!   via [`LexerConfig`].
//! - [`Value`]: a plain materialized tree for the places laziness ends.
//! - [`LexError`] and [`SourcePos`]: positioned tokenization errors.
//!
//! Higher-level traversal lives in `trickle-stream`; path-pattern search
//! lives in `trickle-query`.

pub mod error;
pub mod lex;
pub mod token;
pub mod value;

pub use error::{LexError, LexResult, SourcePos};
pub use lex::{JsonLexer, LexerConfig};
pub use token::{ContainerKind, MemorySource, Scalar, Token, TokenSource};
pub use value::Value;
