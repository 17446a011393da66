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

//! Pull-based JSON tokenizer.
//!
//! [`JsonLexer`] turns bytes from any [`Read`] implementation into the
//! token sequence consumed by the reader layer. It is single-pass and
//! incremental: one token is produced per pull, only the read buffer and
//! a container stack are kept in memory, so documents larger than RAM
//! tokenize in constant space.
//!
//! The lexer enforces the full JSON grammar (commas, colons, balanced
//! containers, one top-level value) and reports violations with line and
//! column positions. Resource limits for untrusted input are configured
//! through [`LexerConfig`].
//!
//! # Examples
//!
//! ```rust
//! use trickle_core::{JsonLexer, Scalar, Token, TokenSource};
//! use std::io::Cursor;
//!
//! let mut lexer = JsonLexer::new(Cursor::new(r#"{"a": 1}"#));
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::ObjectStart));
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::Key("a".to_string())));
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::Scalar(Scalar::Int(1))));
//! assert_eq!(lexer.next_token().unwrap(), Some(Token::ObjectEnd));
//! assert_eq!(lexer.next_token().unwrap(), None);
//! ```

use crate::error::{LexError, LexResult, SourcePos};
use crate::token::{ContainerKind, Scalar, Token, TokenSource};
use memchr::memchr2;
use std::io::Read;

/// Configuration options for the lexer.
///
/// # Examples
///
/// ```rust
/// use trickle_core::LexerConfig;
///
/// let config = LexerConfig::default();
/// assert_eq!(config.max_depth, 128);
/// assert_eq!(config.max_string_length, 1_000_000);
/// assert_eq!(config.buffer_size, 64 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct LexerConfig {
    /// Maximum container nesting depth.
    ///
    /// Protects against deeply nested input that could exhaust the stack
    /// of downstream consumers. Default: 128 levels.
    pub max_depth: usize,

    /// Maximum decoded string length in bytes.
    ///
    /// Protects against single oversized scalars on untrusted input.
    /// Default: 1,000,000 bytes.
    pub max_string_length: usize,

    /// Read buffer size in bytes. Default: 64KB.
    pub buffer_size: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_string_length: 1_000_000,
            buffer_size: 64 * 1024,
        }
    }
}

/// What the grammar allows at the current point in the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Expect {
    /// A value (root position, after ':' or after ',' in an array).
    Value,
    /// A value or ']' (directly after '[').
    ValueOrEnd,
    /// A key or '}' (directly after '{').
    KeyOrEnd,
    /// A key (after ',' in an object).
    Key,
    /// The ':' separating a key from its value.
    Colon,
    /// ',' or the matching container end (after a member/element).
    CommaOrEnd,
    /// Nothing but whitespace (after the top-level value).
    End,
}

/// Streaming JSON tokenizer over any byte source.
///
/// Implements [`TokenSource`]; see the [module docs](self) for the token
/// sequence contract.
pub struct JsonLexer<R: Read> {
    input: R,
    buf: Vec<u8>,
    pos: usize,
    len: usize,
    eof: bool,
    line: usize,
    column: usize,
    stack: Vec<ContainerKind>,
    expect: Expect,
    config: LexerConfig,
}

impl<R: Read> JsonLexer<R> {
    /// Create a lexer with the default configuration.
    pub fn new(input: R) -> Self {
        Self::with_config(input, LexerConfig::default())
    }

    /// Create a lexer with a custom configuration.
    pub fn with_config(input: R, config: LexerConfig) -> Self {
        Self {
            input,
            buf: vec![0; config.buffer_size.max(1)],
            pos: 0,
            len: 0,
            eof: false,
            line: 1,
            column: 1,
            stack: Vec::new(),
            expect: Expect::Value,
            config,
        }
    }

    /// The position of the next unconsumed byte.
    #[inline]
    pub fn position(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }

    fn refill(&mut self) -> LexResult<()> {
        if self.eof {
            return Ok(());
        }
        self.pos = 0;
        self.len = 0;
        loop {
            match self.input.read(&mut self.buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.len = n;
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(LexError::Io(e)),
            }
        }
    }

    fn peek_byte(&mut self) -> LexResult<Option<u8>> {
        if self.pos == self.len {
            self.refill()?;
            if self.pos == self.len {
                return Ok(None);
            }
        }
        Ok(Some(self.buf[self.pos]))
    }

    fn bump(&mut self) -> LexResult<Option<u8>> {
        match self.peek_byte()? {
            Some(b) => {
                self.pos += 1;
                if b == b'\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }

    fn skip_whitespace(&mut self) -> LexResult<()> {
        while let Some(b) = self.peek_byte()? {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.bump()?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn push_container(&mut self, kind: ContainerKind, pos: SourcePos) -> LexResult<()> {
        if self.stack.len() >= self.config.max_depth {
            return Err(LexError::DepthLimitExceeded {
                depth: self.stack.len() + 1,
                max: self.config.max_depth,
                pos,
            });
        }
        self.stack.push(kind);
        Ok(())
    }

    /// Pop the current container; callers have already matched the
    /// closing byte against the top of the stack.
    fn close_container(&mut self, kind: ContainerKind) -> Token {
        self.stack.pop();
        self.expect = if self.stack.is_empty() {
            Expect::End
        } else {
            Expect::CommaOrEnd
        };
        match kind {
            ContainerKind::Object => Token::ObjectEnd,
            ContainerKind::Array => Token::ArrayEnd,
        }
    }

    fn after_value(&mut self) {
        self.expect = if self.stack.is_empty() {
            Expect::End
        } else {
            Expect::CommaOrEnd
        };
    }

    fn lex_value(&mut self, first: u8) -> LexResult<Token> {
        let pos = self.position();
        match first {
            b'{' => {
                self.bump()?;
                self.push_container(ContainerKind::Object, pos)?;
                self.expect = Expect::KeyOrEnd;
                Ok(Token::ObjectStart)
            }
            b'[' => {
                self.bump()?;
                self.push_container(ContainerKind::Array, pos)?;
                self.expect = Expect::ValueOrEnd;
                Ok(Token::ArrayStart)
            }
            b'"' => {
                let s = self.lex_string()?;
                self.after_value();
                Ok(Token::Scalar(Scalar::String(s)))
            }
            b't' => {
                let s = self.lex_literal("true", Scalar::Bool(true))?;
                self.after_value();
                Ok(Token::Scalar(s))
            }
            b'f' => {
                let s = self.lex_literal("false", Scalar::Bool(false))?;
                self.after_value();
                Ok(Token::Scalar(s))
            }
            b'n' => {
                let s = self.lex_literal("null", Scalar::Null)?;
                self.after_value();
                Ok(Token::Scalar(s))
            }
            b'-' | b'0'..=b'9' => {
                let s = self.lex_number()?;
                self.after_value();
                Ok(Token::Scalar(s))
            }
            other => Err(LexError::UnexpectedCharacter {
                found: other as char,
                expected: "value",
                pos,
            }),
        }
    }

    fn lex_literal(&mut self, keyword: &'static str, scalar: Scalar) -> LexResult<Scalar> {
        let pos = self.position();
        let mut seen = String::new();
        for expected in keyword.bytes() {
            match self.peek_byte()? {
                Some(b) if b == expected => {
                    seen.push(b as char);
                    self.bump()?;
                }
                _ => return Err(LexError::InvalidLiteral { literal: seen, pos }),
            }
        }
        Ok(scalar)
    }

    fn lex_number(&mut self) -> LexResult<Scalar> {
        let pos = self.position();
        let mut text = String::new();
        while let Some(b) = self.peek_byte()? {
            match b {
                b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E' => {
                    text.push(b as char);
                    self.bump()?;
                }
                _ => break,
            }
        }
        if !is_json_number(&text) {
            return Err(LexError::InvalidNumber { literal: text, pos });
        }
        if text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
            match text.parse::<f64>() {
                Ok(n) => Ok(Scalar::Float(n)),
                Err(_) => Err(LexError::InvalidNumber { literal: text, pos }),
            }
        } else {
            match text.parse::<i64>() {
                Ok(n) => Ok(Scalar::Int(n)),
                // Out of i64 range: fall back to floating point.
                Err(_) => match text.parse::<f64>() {
                    Ok(n) => Ok(Scalar::Float(n)),
                    Err(_) => Err(LexError::InvalidNumber { literal: text, pos }),
                },
            }
        }
    }

    fn lex_string(&mut self) -> LexResult<String> {
        let start = self.position();
        self.bump()?; // opening quote, verified by the caller
        let mut out: Vec<u8> = Vec::new();
        loop {
            if self.pos == self.len {
                self.refill()?;
                if self.pos == self.len {
                    return Err(LexError::UnexpectedEof {
                        expected: "closing '\"'",
                        pos: self.position(),
                    });
                }
            }
            let stop = match memchr2(b'"', b'\\', &self.buf[self.pos..self.len]) {
                Some(i) => self.pos + i,
                None => self.len,
            };
            if let Some(j) = self.buf[self.pos..stop].iter().position(|&b| b < 0x20) {
                self.advance_in_string(j);
                return Err(LexError::UnescapedControl {
                    byte: self.buf[self.pos],
                    pos: self.position(),
                });
            }
            out.extend_from_slice(&self.buf[self.pos..stop]);
            self.advance_in_string(stop - self.pos);
            if out.len() > self.config.max_string_length {
                return Err(LexError::StringTooLong {
                    length: out.len(),
                    max: self.config.max_string_length,
                    pos: start,
                });
            }
            if stop == self.len {
                continue;
            }
            let b = self.buf[self.pos];
            self.advance_in_string(1);
            if b == b'"' {
                return String::from_utf8(out).map_err(|_| LexError::Utf8 { pos: start });
            }
            self.lex_escape(&mut out)?;
        }
    }

    /// Advance over string content bytes. Raw newlines cannot occur here
    /// (they are rejected as control characters), so column-only updates
    /// are sufficient.
    #[inline]
    fn advance_in_string(&mut self, n: usize) {
        self.pos += n;
        self.column += n;
    }

    fn lex_escape(&mut self, out: &mut Vec<u8>) -> LexResult<()> {
        let pos = self.position();
        let b = match self.bump()? {
            Some(b) => b,
            None => {
                return Err(LexError::UnexpectedEof {
                    expected: "escape sequence",
                    pos: self.position(),
                })
            }
        };
        match b {
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            b'/' => out.push(b'/'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => {
                let hi = self.lex_hex4(pos)?;
                let code_point = if (0xD800..=0xDBFF).contains(&hi) {
                    // High surrogate: the low half must follow directly.
                    if self.bump()? != Some(b'\\') || self.bump()? != Some(b'u') {
                        return Err(LexError::escape(pos, "unpaired surrogate"));
                    }
                    let lo = self.lex_hex4(pos)?;
                    if !(0xDC00..=0xDFFF).contains(&lo) {
                        return Err(LexError::escape(pos, "unpaired surrogate"));
                    }
                    0x10000 + (((hi - 0xD800) << 10) | (lo - 0xDC00))
                } else if (0xDC00..=0xDFFF).contains(&hi) {
                    return Err(LexError::escape(pos, "unpaired surrogate"));
                } else {
                    hi
                };
                let ch = char::from_u32(code_point)
                    .ok_or_else(|| LexError::escape(pos, "invalid code point"))?;
                let mut enc = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
            }
            other => {
                return Err(LexError::escape(
                    pos,
                    format!("unknown escape '\\{}'", other as char),
                ))
            }
        }
        Ok(())
    }

    fn lex_hex4(&mut self, pos: SourcePos) -> LexResult<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            let b = match self.bump()? {
                Some(b) => b,
                None => {
                    return Err(LexError::UnexpectedEof {
                        expected: "unicode escape",
                        pos: self.position(),
                    })
                }
            };
            let digit = (b as char)
                .to_digit(16)
                .ok_or_else(|| LexError::escape(pos, "invalid unicode escape"))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }
}

impl<R: Read> TokenSource for JsonLexer<R> {
    fn next_token(&mut self) -> LexResult<Option<Token>> {
        loop {
            self.skip_whitespace()?;
            let Some(b) = self.peek_byte()? else {
                return match self.expect {
                    Expect::End => Ok(None),
                    // Nothing but whitespace before any value: an empty
                    // document, reported as such by the reader layer.
                    Expect::Value if self.stack.is_empty() => Ok(None),
                    _ => Err(LexError::UnexpectedEof {
                        expected: expectation_name(self.expect),
                        pos: self.position(),
                    }),
                };
            };
            match self.expect {
                Expect::Value => return self.lex_value(b).map(Some),
                Expect::ValueOrEnd => {
                    if b == b']' {
                        self.bump()?;
                        return Ok(Some(self.close_container(ContainerKind::Array)));
                    }
                    return self.lex_value(b).map(Some);
                }
                Expect::KeyOrEnd | Expect::Key => {
                    if b == b'}' && self.expect == Expect::KeyOrEnd {
                        self.bump()?;
                        return Ok(Some(self.close_container(ContainerKind::Object)));
                    }
                    if b == b'"' {
                        let key = self.lex_string()?;
                        self.expect = Expect::Colon;
                        return Ok(Some(Token::Key(key)));
                    }
                    return Err(LexError::UnexpectedCharacter {
                        found: b as char,
                        expected: expectation_name(self.expect),
                        pos: self.position(),
                    });
                }
                Expect::Colon => {
                    if b == b':' {
                        self.bump()?;
                        self.expect = Expect::Value;
                        continue;
                    }
                    return Err(LexError::UnexpectedCharacter {
                        found: b as char,
                        expected: "':'",
                        pos: self.position(),
                    });
                }
                Expect::CommaOrEnd => match b {
                    b',' => {
                        self.bump()?;
                        self.expect = match self.stack.last() {
                            Some(ContainerKind::Object) => Expect::Key,
                            _ => Expect::Value,
                        };
                        continue;
                    }
                    b'}' if self.stack.last() == Some(&ContainerKind::Object) => {
                        self.bump()?;
                        return Ok(Some(self.close_container(ContainerKind::Object)));
                    }
                    b']' if self.stack.last() == Some(&ContainerKind::Array) => {
                        self.bump()?;
                        return Ok(Some(self.close_container(ContainerKind::Array)));
                    }
                    other => {
                        return Err(LexError::UnexpectedCharacter {
                            found: other as char,
                            expected: "',' or container end",
                            pos: self.position(),
                        })
                    }
                },
                Expect::End => {
                    return Err(LexError::TrailingCharacters {
                        pos: self.position(),
                    })
                }
            }
        }
    }
}

fn expectation_name(expect: Expect) -> &'static str {
    match expect {
        Expect::Value => "value",
        Expect::ValueOrEnd => "value or ']'",
        Expect::KeyOrEnd => "object key or '}'",
        Expect::Key => "object key",
        Expect::Colon => "':'",
        Expect::CommaOrEnd => "',' or container end",
        Expect::End => "end of input",
    }
}

/// Validate a collected number literal against the JSON grammar.
fn is_json_number(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if b.first() == Some(&b'-') {
        i += 1;
    }
    match b.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            i += 1;
            while matches!(b.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return false,
    }
    if b.get(i) == Some(&b'.') {
        i += 1;
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(b.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(b.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    i == b.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lex_all(input: &str) -> Vec<Token> {
        let mut lexer = JsonLexer::new(Cursor::new(input));
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token().unwrap() {
            tokens.push(token);
        }
        tokens
    }

    fn lex_err(input: &str) -> LexError {
        let mut lexer = JsonLexer::new(Cursor::new(input));
        loop {
            match lexer.next_token() {
                Ok(Some(_)) => continue,
                Ok(None) => panic!("expected an error for {:?}", input),
                Err(e) => return e,
            }
        }
    }

    // ==================== Happy path ====================

    #[test]
    fn test_lex_flat_object() {
        assert_eq!(
            lex_all(r#"{"a": 1, "b": "two"}"#),
            vec![
                Token::ObjectStart,
                Token::Key("a".to_string()),
                Token::Scalar(Scalar::Int(1)),
                Token::Key("b".to_string()),
                Token::Scalar(Scalar::String("two".to_string())),
                Token::ObjectEnd,
            ]
        );
    }

    #[test]
    fn test_lex_nested_containers() {
        assert_eq!(
            lex_all(r#"{"a": [1, {"b": []}]}"#),
            vec![
                Token::ObjectStart,
                Token::Key("a".to_string()),
                Token::ArrayStart,
                Token::Scalar(Scalar::Int(1)),
                Token::ObjectStart,
                Token::Key("b".to_string()),
                Token::ArrayStart,
                Token::ArrayEnd,
                Token::ObjectEnd,
                Token::ArrayEnd,
                Token::ObjectEnd,
            ]
        );
    }

    #[test]
    fn test_lex_all_scalar_kinds() {
        assert_eq!(
            lex_all(r#"[null, true, false, 42, -7, 3.5, 1e3, "s"]"#),
            vec![
                Token::ArrayStart,
                Token::Scalar(Scalar::Null),
                Token::Scalar(Scalar::Bool(true)),
                Token::Scalar(Scalar::Bool(false)),
                Token::Scalar(Scalar::Int(42)),
                Token::Scalar(Scalar::Int(-7)),
                Token::Scalar(Scalar::Float(3.5)),
                Token::Scalar(Scalar::Float(1000.0)),
                Token::Scalar(Scalar::String("s".to_string())),
                Token::ArrayEnd,
            ]
        );
    }

    #[test]
    fn test_lex_empty_containers() {
        assert_eq!(lex_all("{}"), vec![Token::ObjectStart, Token::ObjectEnd]);
        assert_eq!(lex_all("[]"), vec![Token::ArrayStart, Token::ArrayEnd]);
    }

    #[test]
    fn test_lex_top_level_scalar() {
        assert_eq!(lex_all("1"), vec![Token::Scalar(Scalar::Int(1))]);
        assert_eq!(
            lex_all("\"x\""),
            vec![Token::Scalar(Scalar::String("x".to_string()))]
        );
    }

    #[test]
    fn test_lex_empty_input() {
        assert_eq!(lex_all(""), Vec::<Token>::new());
        assert_eq!(lex_all("   \n\t "), Vec::<Token>::new());
    }

    #[test]
    fn test_lex_whitespace_everywhere() {
        assert_eq!(
            lex_all(" { \"a\" \t:\r\n [ 1 , 2 ] } "),
            vec![
                Token::ObjectStart,
                Token::Key("a".to_string()),
                Token::ArrayStart,
                Token::Scalar(Scalar::Int(1)),
                Token::Scalar(Scalar::Int(2)),
                Token::ArrayEnd,
                Token::ObjectEnd,
            ]
        );
    }

    #[test]
    fn test_lex_int_overflow_falls_back_to_float() {
        let tokens = lex_all("99999999999999999999");
        match &tokens[0] {
            Token::Scalar(Scalar::Float(n)) => assert!(*n > 9.9e19),
            other => panic!("expected float fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_lex_negative_zero_and_exponents() {
        assert_eq!(lex_all("-0"), vec![Token::Scalar(Scalar::Int(0))]);
        assert_eq!(lex_all("2E-2"), vec![Token::Scalar(Scalar::Float(0.02))]);
        assert_eq!(lex_all("1.25e2"), vec![Token::Scalar(Scalar::Float(125.0))]);
    }

    // ==================== Strings ====================

    #[test]
    fn test_lex_string_escapes() {
        assert_eq!(
            lex_all(r#""a\"b\\c\/d\b\f\n\r\t""#),
            vec![Token::Scalar(Scalar::String(
                "a\"b\\c/d\u{8}\u{c}\n\r\t".to_string()
            ))]
        );
    }

    #[test]
    fn test_lex_unicode_escape() {
        assert_eq!(
            lex_all(r#""\u0041\u00e9""#),
            vec![Token::Scalar(Scalar::String("Aé".to_string()))]
        );
    }

    #[test]
    fn test_lex_surrogate_pair() {
        assert_eq!(
            lex_all(r#""\ud83d\ude00""#),
            vec![Token::Scalar(Scalar::String("\u{1F600}".to_string()))]
        );
    }

    #[test]
    fn test_lex_multibyte_utf8_passthrough() {
        assert_eq!(
            lex_all("\"日本語\""),
            vec![Token::Scalar(Scalar::String("日本語".to_string()))]
        );
    }

    #[test]
    fn test_lex_key_with_escape() {
        assert_eq!(
            lex_all(r#"{"a\nb": 1}"#),
            vec![
                Token::ObjectStart,
                Token::Key("a\nb".to_string()),
                Token::Scalar(Scalar::Int(1)),
                Token::ObjectEnd,
            ]
        );
    }

    // ==================== Errors ====================

    #[test]
    fn test_lex_lone_surrogate_is_error() {
        assert!(matches!(
            lex_err(r#""\ud83d""#),
            LexError::InvalidEscape { .. }
        ));
        assert!(matches!(
            lex_err(r#""\ude00""#),
            LexError::InvalidEscape { .. }
        ));
    }

    #[test]
    fn test_lex_unknown_escape_is_error() {
        assert!(matches!(
            lex_err(r#""\q""#),
            LexError::InvalidEscape { .. }
        ));
    }

    #[test]
    fn test_lex_raw_control_character_is_error() {
        assert!(matches!(
            lex_err("\"a\tb\""),
            LexError::UnescapedControl { byte: 0x09, .. }
        ));
    }

    #[test]
    fn test_lex_unclosed_string_is_error() {
        assert!(matches!(
            lex_err("\"abc"),
            LexError::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_lex_unclosed_container_is_error() {
        assert!(matches!(
            lex_err(r#"{"a": 1"#),
            LexError::UnexpectedEof { .. }
        ));
        assert!(matches!(lex_err("[1, 2"), LexError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_lex_mismatched_close_is_error() {
        assert!(matches!(
            lex_err("[1}"),
            LexError::UnexpectedCharacter { found: '}', .. }
        ));
        assert!(matches!(
            lex_err(r#"{"a": 1]"#),
            LexError::UnexpectedCharacter { found: ']', .. }
        ));
    }

    #[test]
    fn test_lex_unmatched_close_is_error() {
        assert!(matches!(
            lex_err("]"),
            LexError::UnexpectedCharacter { found: ']', .. }
        ));
    }

    #[test]
    fn test_lex_trailing_garbage_is_error() {
        assert!(matches!(
            lex_err("{} x"),
            LexError::TrailingCharacters { .. }
        ));
        assert!(matches!(
            lex_err("1 2"),
            LexError::TrailingCharacters { .. }
        ));
    }

    #[test]
    fn test_lex_invalid_numbers() {
        assert!(matches!(lex_err("01"), LexError::InvalidNumber { .. }));
        assert!(matches!(lex_err("1."), LexError::InvalidNumber { .. }));
        assert!(matches!(lex_err("-"), LexError::InvalidNumber { .. }));
        assert!(matches!(lex_err("1e"), LexError::InvalidNumber { .. }));
        assert!(matches!(lex_err("1.2.3"), LexError::InvalidNumber { .. }));
    }

    #[test]
    fn test_lex_invalid_literal() {
        assert!(matches!(lex_err("nul"), LexError::InvalidLiteral { .. }));
        assert!(matches!(lex_err("tru "), LexError::InvalidLiteral { .. }));
    }

    #[test]
    fn test_lex_missing_colon() {
        assert!(matches!(
            lex_err(r#"{"a" 1}"#),
            LexError::UnexpectedCharacter { found: '1', .. }
        ));
    }

    #[test]
    fn test_lex_missing_comma() {
        assert!(matches!(
            lex_err("[1 2]"),
            LexError::UnexpectedCharacter { found: '2', .. }
        ));
    }

    #[test]
    fn test_lex_unquoted_key() {
        assert!(matches!(
            lex_err("{a: 1}"),
            LexError::UnexpectedCharacter { found: 'a', .. }
        ));
    }

    #[test]
    fn test_lex_error_position() {
        let err = lex_err("{\n  \"a\": x\n}");
        assert_eq!(err.line(), Some(2));
        let pos = err.pos().unwrap();
        assert_eq!(pos.column(), 8);
    }

    #[test]
    fn test_lex_error_column_counts_bytes() {
        // The two-byte 'é' advances the column by two, so the missing
        // comma is reported at byte column 7, not character column 6.
        let err = lex_err("[\"\u{e9}\" 1]");
        assert_eq!(err.pos().unwrap().column(), 7);
    }

    // ==================== Limits ====================

    #[test]
    fn test_lex_depth_limit() {
        let config = LexerConfig {
            max_depth: 3,
            ..Default::default()
        };
        let mut lexer = JsonLexer::with_config(Cursor::new("[[[[1]]]]"), config);
        let err = loop {
            match lexer.next_token() {
                Ok(Some(_)) => continue,
                Ok(None) => panic!("expected depth error"),
                Err(e) => break e,
            }
        };
        assert!(matches!(
            err,
            LexError::DepthLimitExceeded { depth: 4, max: 3, .. }
        ));
    }

    #[test]
    fn test_lex_string_length_limit() {
        let config = LexerConfig {
            max_string_length: 4,
            ..Default::default()
        };
        let mut lexer = JsonLexer::with_config(Cursor::new("\"abcdef\""), config);
        assert!(matches!(
            lexer.next_token(),
            Err(LexError::StringTooLong { max: 4, .. })
        ));
    }

    #[test]
    fn test_lex_tiny_buffer_still_works() {
        // Forces strings and numbers to span refills.
        let config = LexerConfig {
            buffer_size: 2,
            ..Default::default()
        };
        let input = r#"{"alpha": [123, "beta\u0041", true]}"#;
        let mut lexer = JsonLexer::with_config(Cursor::new(input), config);
        let mut tokens = Vec::new();
        while let Some(t) = lexer.next_token().unwrap() {
            tokens.push(t);
        }
        assert_eq!(
            tokens,
            vec![
                Token::ObjectStart,
                Token::Key("alpha".to_string()),
                Token::ArrayStart,
                Token::Scalar(Scalar::Int(123)),
                Token::Scalar(Scalar::String("betaA".to_string())),
                Token::Scalar(Scalar::Bool(true)),
                Token::ArrayEnd,
                Token::ObjectEnd,
            ]
        );
    }

    // ==================== Number grammar ====================

    #[test]
    fn test_is_json_number() {
        for ok in ["0", "-0", "1", "-1", "10", "1.5", "0.5", "1e3", "1E+3", "1.5e-2"] {
            assert!(is_json_number(ok), "{} should be valid", ok);
        }
        for bad in ["", "-", "01", "1.", ".5", "+1", "1e", "1e+", "1..2", "--1"] {
            assert!(!is_json_number(bad), "{} should be invalid", bad);
        }
    }
}
