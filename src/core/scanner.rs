//! Token search over a decoded page.
//!
//! The markup uses four structural tokens: `{{`, `}}`, `|` and `=`. The
//! scanner does not tokenize the page up front; the builder asks for the
//! nearest token from a cursor and decides what the text in between means.

use std::fmt;
use std::ops::Range;

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use super::escape::{self, Decoded};

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{|\}\}|\||=").expect("token pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OpenTemplate,
    CloseTemplate,
    Separator,
    Assignment,
    /// Synthetic marker for "no further token".
    End,
}

impl TokenKind {
    fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "{{" => Some(TokenKind::OpenTemplate),
            "}}" => Some(TokenKind::CloseTemplate),
            "|" => Some(TokenKind::Separator),
            "=" => Some(TokenKind::Assignment),
            _ => None,
        }
    }

    /// Token terminates a value.
    pub fn ends_value(self) -> bool {
        matches!(self, TokenKind::Separator | TokenKind::CloseTemplate | TokenKind::End)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::OpenTemplate => write!(f, "{{{{"),
            TokenKind::CloseTemplate => write!(f, "}}}}"),
            TokenKind::Separator => write!(f, "|"),
            TokenKind::Assignment => write!(f, "="),
            TokenKind::End => write!(f, "<end>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

pub struct Scanner {
    buffer: Decoded,
}

impl Scanner {
    /// Decodes escapes in `raw` and prepares it for scanning.
    pub fn new(raw: &str) -> Self {
        Self { buffer: escape::decode_buffer(raw) }
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Text between two cursors, trimmed.
    pub fn slice(&self, span: Range<usize>) -> &str {
        self.buffer.text()[span].trim()
    }

    fn end_marker(&self) -> Token {
        let len = self.buffer.text().len();
        Token { kind: TokenKind::End, span: len..len }
    }

    /// Nearest token starting at or after `from`.
    ///
    /// Returns the [`TokenKind::End`] marker when the buffer is exhausted.
    pub fn next_token(&self, from: usize) -> Token {
        let text = self.buffer.text();
        let mut pos = from;
        while pos <= text.len() {
            let Some(found) = TOKEN.find_at(text, pos) else {
                break;
            };
            if self.buffer.is_literal(found.range()) {
                trace!("Skipping escaped token at {}", found.start());
                pos = found.start() + 1;
                continue;
            }
            if let Some(kind) = TokenKind::from_lexeme(found.as_str()) {
                return Token { kind, span: found.range() };
            }
            pos = found.start() + 1;
        }
        self.end_marker()
    }

    /// Nearest token at or after `from` that can end a value.
    ///
    /// Assignments inside a value are content, so they are skipped.
    pub fn next_value_token(&self, from: usize) -> Token {
        let mut token = self.next_token(from);
        while token.kind == TokenKind::Assignment {
            token = self.next_token(token.end());
        }
        token
    }

    /// Nearest token ending at or before `before`, if any.
    pub fn prev_token(&self, before: usize) -> Option<Token> {
        let bytes = self.buffer.text().as_bytes();
        let mut end = before.min(bytes.len());
        while end > 0 {
            let candidate = if end >= 2 && matches!(&bytes[end - 2..end], b"{{" | b"}}") {
                Some(end - 2)
            } else if matches!(bytes[end - 1], b'|' | b'=') {
                Some(end - 1)
            } else {
                None
            };

            if let Some(start) = candidate {
                if !self.buffer.is_literal(start..end) {
                    let lexeme = &self.buffer.text()[start..end];
                    if let Some(kind) = TokenKind::from_lexeme(lexeme) {
                        return Some(Token { kind, span: start..end });
                    }
                }
            }
            end -= 1;
        }
        None
    }
}
