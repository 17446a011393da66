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

//! Path-pattern search over lazy JSON streams.
//!
//! Patterns are dot-separated paths with literal keys, `[N]` indices,
//! and `*` wildcards; see [`Pattern`] for the grammar. [`search`] runs a
//! pattern over a byte stream in one pass, materializing only the
//! values that match.

pub mod error;
pub mod pattern;
pub mod search;

pub use error::{PatternError, QueryError, QueryResult};
pub use pattern::{Component, Pattern};
pub use search::{search, search_source, search_with, Match};
