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

//! Path patterns.
//!
//! A pattern is a dot-separated list of components matched against the
//! keys along a path from the document root:
//!
//! - a bare word matches an object key literally,
//! - `[N]` matches the array element at index `N`,
//! - `*` matches any key or index at that level.
//!
//! `users.[0].name` matches the `name` member of the first element of
//! the `users` array. `users.*.name` matches `name` in every element.
//!
//! Components other than an exact `*` are literal keys, so a key like
//! `*x` needs no escaping. A component starting with `[` must be a
//! well-formed index.

use crate::error::PatternError;
use std::str::FromStr;
use trickle_stream::EntryKey;

/// One level of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Match this object key exactly.
    Key(String),
    /// Match this array index exactly.
    Index(usize),
    /// Match any key or index.
    Wildcard,
}

impl Component {
    /// Check this component against a concrete entry key.
    ///
    /// Literal components never match across kinds: a key component does
    /// not match an array index and vice versa. The wildcard matches
    /// everything.
    pub fn matches(&self, key: &EntryKey) -> bool {
        match (self, key) {
            (Self::Wildcard, _) => true,
            (Self::Key(want), EntryKey::Key(got)) => want == got,
            (Self::Index(want), EntryKey::Index(got)) => want == got,
            _ => false,
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(k) => write!(f, "{}", k),
            Self::Index(i) => write!(f, "[{}]", i),
            Self::Wildcard => write!(f, "*"),
        }
    }
}

/// A compiled path pattern.
///
/// # Examples
///
/// ```rust
/// use trickle_query::{Component, Pattern};
///
/// let pattern: Pattern = "users.[0].*".parse()?;
/// assert_eq!(pattern.len(), 3);
/// assert_eq!(pattern.get(1), Some(&Component::Index(0)));
/// assert_eq!(pattern.to_string(), "users.[0].*");
/// # Ok::<(), trickle_query::PatternError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    components: Vec<Component>,
}

impl Pattern {
    /// Build a pattern from components.
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// The components in root-to-leaf order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The component at the given depth.
    pub fn get(&self, depth: usize) -> Option<&Component> {
        self.components.get(depth)
    }

    /// The number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the pattern has no components. An empty pattern matches
    /// nothing.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        let mut components = Vec::new();
        for (position, part) in s.split('.').enumerate() {
            let component = if part.is_empty() {
                return Err(PatternError::EmptyComponent { position });
            } else if part == "*" {
                Component::Wildcard
            } else if let Some(rest) = part.strip_prefix('[') {
                let digits = rest.strip_suffix(']').ok_or_else(|| {
                    PatternError::InvalidIndex {
                        component: part.to_string(),
                        position,
                    }
                })?;
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| PatternError::InvalidIndex {
                        component: part.to_string(),
                        position,
                    })?;
                Component::Index(index)
            } else {
                Component::Key(part.to_string())
            };
            components.push(component);
        }
        Ok(Self { components })
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_parse_components() {
        let pattern: Pattern = "level-1.[0].*.[0].level-3a.*.b".parse().unwrap();
        assert_eq!(
            pattern.components(),
            &[
                Component::Key("level-1".to_string()),
                Component::Index(0),
                Component::Wildcard,
                Component::Index(0),
                Component::Key("level-3a".to_string()),
                Component::Wildcard,
                Component::Key("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_pattern_display_round_trip() {
        for text in ["a", "a.b.c", "users.[0].name", "*.x.[12].*", "level-1.[0].*.[0].level-3a.*.b"] {
            let pattern: Pattern = text.parse().unwrap();
            assert_eq!(pattern.to_string(), text);
        }
    }

    #[test]
    fn test_pattern_empty_string_is_empty_pattern() {
        let pattern: Pattern = "".parse().unwrap();
        assert!(pattern.is_empty());
        assert_eq!(pattern.len(), 0);
    }

    #[test]
    fn test_pattern_empty_component_is_error() {
        assert_eq!(
            "a..b".parse::<Pattern>(),
            Err(PatternError::EmptyComponent { position: 1 })
        );
        assert_eq!(
            ".a".parse::<Pattern>(),
            Err(PatternError::EmptyComponent { position: 0 })
        );
        assert_eq!(
            "a.".parse::<Pattern>(),
            Err(PatternError::EmptyComponent { position: 1 })
        );
    }

    #[test]
    fn test_pattern_invalid_index_is_error() {
        for bad in ["[x]", "[]", "[12", "[-1]"] {
            let text = format!("a.{}", bad);
            assert_eq!(
                text.parse::<Pattern>(),
                Err(PatternError::InvalidIndex {
                    component: bad.to_string(),
                    position: 1,
                })
            );
        }
    }

    #[test]
    fn test_pattern_dotted_index_splits_first() {
        // Components split on '.' before bracket handling, so a dot
        // inside brackets produces a truncated index component.
        assert_eq!(
            "a.[1.5]".parse::<Pattern>(),
            Err(PatternError::InvalidIndex {
                component: "[1".to_string(),
                position: 1,
            })
        );
    }

    #[test]
    fn test_pattern_star_prefix_is_literal_key() {
        let pattern: Pattern = "*x".parse().unwrap();
        assert_eq!(pattern.get(0), Some(&Component::Key("*x".to_string())));
    }

    #[test]
    fn test_component_matches_literal_key() {
        let c = Component::Key("a".to_string());
        assert!(c.matches(&EntryKey::Key("a".to_string())));
        assert!(!c.matches(&EntryKey::Key("b".to_string())));
        assert!(!c.matches(&EntryKey::Index(0)));
    }

    #[test]
    fn test_component_matches_index() {
        let c = Component::Index(2);
        assert!(c.matches(&EntryKey::Index(2)));
        assert!(!c.matches(&EntryKey::Index(3)));
        assert!(!c.matches(&EntryKey::Key("2".to_string())));
    }

    #[test]
    fn test_component_wildcard_matches_everything() {
        let c = Component::Wildcard;
        assert!(c.matches(&EntryKey::Key("anything".to_string())));
        assert!(c.matches(&EntryKey::Index(99)));
    }
}
