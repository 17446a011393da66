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

//! Lazy, memory-bounded traversal over JSON token streams.
//!
//! The model is a tree of readers sharing one forward-only cursor:
//!
//! - [`Document`] validates the root and hands out the root reader.
//! - [`NodeReader`] yields `(key, value)` entries one at a time; nested
//!   containers come back as child readers over the same cursor.
//! - Abandoned children are reclaimed automatically: the parent skips
//!   their unread tokens before yielding its next entry.
//! - [`Mode`] controls whether nested containers stay lazy or are
//!   materialized into [`Value`](trickle_core::Value) trees.
//!
//! Memory use is bounded by nesting depth plus one scalar, regardless of
//! document size, as long as traversal stays lazy.

pub mod cursor;
pub mod document;
pub mod error;
pub mod reader;

pub use cursor::Cursor;
pub use document::Document;
pub use error::{StreamError, StreamResult};
pub use reader::{EntryKey, EntryValue, Mode, NodeReader};
