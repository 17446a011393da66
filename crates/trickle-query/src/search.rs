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

//! Streaming pattern search.
//!
//! A search walks the document once, front to back, matching pattern
//! components against the keys along each path from the root. Matches
//! are reported in document order with their concrete paths: wildcards
//! in the pattern appear as the actual keys and indices they matched.
//!
//! Only matched leaf values are materialized. Subtrees that cannot
//! match are skipped at the token level, so a search over a large
//! document touches memory proportional to the pattern depth plus the
//! largest single match.
//!
//! # Examples
//!
//! ```rust
//! use trickle_query::search;
//!
//! let data = r#"{"users": [{"name": "ada"}, {"name": "grace"}]}"#;
//! let matches = search(data.as_bytes(), "users.*.name")?;
//!
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].value.as_str(), Some("ada"));
//! assert_eq!(matches[0].path_string(), "users.[0].name");
//! assert_eq!(matches[1].value.as_str(), Some("grace"));
//! # Ok::<(), trickle_query::QueryError>(())
//! ```

use crate::error::QueryResult;
use crate::pattern::Pattern;
use std::io::Read;
use trickle_core::{JsonLexer, TokenSource, Value};
use trickle_stream::{Cursor, EntryKey, EntryValue, NodeReader};

/// One search result: the concrete path and the materialized value.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// The keys and indices from the root to the matched entry.
    pub path: Vec<EntryKey>,
    /// The matched value, fully materialized.
    pub value: Value,
}

impl Match {
    /// Render the path in pattern syntax, such as `users.[0].name`.
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for (i, key) in self.path.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&key.to_string());
        }
        out
    }
}

/// Search a JSON byte stream with a pattern string.
///
/// Compiles `pattern` and collects every match in document order. A
/// scalar or empty document matches nothing; see [`search_source`] for
/// the exact edge-case behavior.
pub fn search<R: Read>(reader: R, pattern: &str) -> QueryResult<Vec<Match>> {
    let pattern: Pattern = pattern.parse()?;
    search_source(JsonLexer::new(reader), &pattern)
}

/// Search any token source with a compiled pattern, collecting matches.
pub fn search_source<S: TokenSource>(source: S, pattern: &Pattern) -> QueryResult<Vec<Match>> {
    let mut matches = Vec::new();
    search_with(source, pattern, |path, value| {
        matches.push(Match {
            path: path.to_vec(),
            value,
        });
    })?;
    Ok(matches)
}

/// Search any token source, reporting each match through a callback.
///
/// The callback receives the concrete path and the materialized value.
/// Matches stream out in document order without being buffered, so this
/// is the form to use when the result set itself may be large.
///
/// Searches that cannot match anything succeed with no calls: an empty
/// pattern, an empty document, or a bare scalar at the root.
pub fn search_with<S, F>(source: S, pattern: &Pattern, mut visit: F) -> QueryResult<()>
where
    S: TokenSource,
    F: FnMut(&[EntryKey], Value),
{
    if pattern.is_empty() {
        return Ok(());
    }
    let mut cursor = Cursor::new(source);
    match cursor.peek()? {
        Some(token) if token.container_start().is_some() => {}
        // Scalar or empty documents have no paths to match.
        _ => return Ok(()),
    }
    let mut root = NodeReader::open(&mut cursor)?;
    let mut prefix = Vec::with_capacity(pattern.len());
    search_node(&mut root, pattern, 0, &mut prefix, &mut visit)
}

fn search_node<S, F>(
    node: &mut NodeReader<'_, S>,
    pattern: &Pattern,
    depth: usize,
    prefix: &mut Vec<EntryKey>,
    visit: &mut F,
) -> QueryResult<()>
where
    S: TokenSource,
    F: FnMut(&[EntryKey], Value),
{
    let component = match pattern.get(depth) {
        Some(component) => component,
        None => return Ok(()),
    };
    let leaf = depth + 1 == pattern.len();
    while let Some((key, value)) = node.next_entry()? {
        if !component.matches(&key) {
            // Unmatched entries are dropped; their tokens are skipped
            // when the reader pulls the next entry.
            continue;
        }
        if leaf {
            let value = value.materialize()?;
            prefix.push(key);
            visit(prefix, value);
            prefix.pop();
        } else if let EntryValue::Node(mut child) = value {
            prefix.push(key);
            search_node(&mut child, pattern, depth + 1, prefix, visit)?;
            prefix.pop();
        }
        // A scalar where the pattern still has components cannot match.
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(data: &str, pattern: &str) -> Vec<Match> {
        search(data.as_bytes(), pattern).unwrap()
    }

    #[test]
    fn test_search_literal_path() {
        let data = r#"{"moose": {"a": [1, 2, 3], "b": {"nested": [1, 2, 3]}, "c": [1, 2, 3]}}"#;
        let matches = run(data, "moose.a.[2]");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, Value::Int(3));
        assert_eq!(matches[0].path_string(), "moose.a.[2]");
    }

    #[test]
    fn test_search_deeper_literal_path() {
        let data =
            r#"{"moose": {"a": [1, 2, 3], "b": {"nested": [1, 2, 3]}, "c": [1, 2, 3], "d": 1}}"#;
        let matches = run(data, "moose.b.nested.[0]");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, Value::Int(1));
    }

    #[test]
    fn test_search_wildcards_report_concrete_paths() {
        let data =
            r#"{"moose": {"a": [1, 2, 3], "b": {"nested": [1, 2, 3]}, "c": [4, 5, 6]}, "d": 1}"#;
        let matches = run(data, "*.*");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].path_string(), "moose.a");
        assert_eq!(
            matches[0].value,
            Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(matches[1].path_string(), "moose.b");
        assert_eq!(
            matches[1].value,
            Value::Object(vec![(
                "nested".to_string(),
                Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
            )])
        );
        assert_eq!(matches[2].path_string(), "moose.c");
    }

    #[test]
    fn test_search_scalar_mid_pattern_does_not_match() {
        // "d" matches the leading wildcard but is a scalar, so the
        // remaining component can never match beneath it.
        let data = r#"{"moose": {"a": 1}, "d": 1}"#;
        let matches = run(data, "*.a");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path_string(), "moose.a");
    }

    #[test]
    fn test_search_wildcard_matches_array_indices() {
        let data = r#"{"moose": [{"goose": [{"house": [{"truce": 0}]}]}]}"#;
        let matches = run(data, "moose.*.*");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path_string(), "moose.[0].goose");
        assert_eq!(
            matches[0].value,
            Value::Array(vec![Value::Object(vec![(
                "house".to_string(),
                Value::Array(vec![Value::Object(vec![(
                    "truce".to_string(),
                    Value::Int(0)
                )])])
            )])])
        );
    }

    #[test]
    fn test_search_no_match() {
        let matches = run(r#"{"moose": 1}"#, "goose");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_search_scalar_root_matches_nothing() {
        let matches = run("1", "*");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_search_empty_document_matches_nothing() {
        let matches = run("", "*");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_search_empty_pattern_matches_nothing() {
        let matches = run(r#"{"moose": 1}"#, "");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_search_pattern_deeper_than_document() {
        let matches = run(r#"{"a": {"b": 1}}"#, "a.b.c.d");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_search_with_streams_matches() {
        let data = r#"{"xs": [10, 20, 30]}"#;
        let pattern: Pattern = "xs.*".parse().unwrap();
        let mut seen = Vec::new();
        search_with(JsonLexer::new(data.as_bytes()), &pattern, |path, value| {
            seen.push((path.last().cloned().unwrap(), value));
        })
        .unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], (EntryKey::Index(0), Value::Int(10)));
        assert_eq!(seen[2], (EntryKey::Index(2), Value::Int(30)));
    }

    #[test]
    fn test_search_invalid_pattern_is_error() {
        assert!(search("{}".as_bytes(), "a..b").is_err());
    }

    #[test]
    fn test_search_malformed_json_is_error() {
        assert!(search(r#"{"a": [1, 2}"#.as_bytes(), "a.*").is_err());
    }
}
