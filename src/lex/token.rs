//! Token and span types.
//!
//! Tokens never own text. They carry half-open byte ranges into the original
//! source, so extraction stays zero-copy until a consumer serializes.

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into the original source content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,

    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Borrow the spanned text from the original source.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Lexical token classes.
///
/// The set is deliberately coarse: the extractor is a brace-depth machine,
/// not a grammar, so it only needs to tell words, literals, comments,
/// directives, and punctuation apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Run of whitespace, including newlines.
    Whitespace,
    /// Line (`//`) or block (`/* */`) comment.
    Comment,
    /// Preprocessor directive, opaque from `#` to end of line
    /// (backslash continuations included).
    Directive,
    /// Identifier.
    Ident,
    /// Language keyword for the active lexer mode.
    Keyword,
    /// Numeric literal.
    Number,
    /// String literal, quotes included.
    Str,
    /// Character literal, quotes included.
    Char,
    /// `<` or `>` recognized as a template bracket (C++ mode only).
    TemplateAngle,
    /// Any other punctuation (single character, plus `::`).
    Punct,
}

/// A single token: kind plus byte span into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Token class.
    pub kind: TokenKind,

    /// Byte span into the original content.
    pub span: Span,
}

impl Token {
    /// Borrow the token text from the original source.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Whether this token is whitespace or a comment.
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_text() {
        let src = "int main() {}";
        let span = Span::new(4, 8);
        assert_eq!(span.text(src), "main");
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_empty_span() {
        let span = Span::new(3, 3);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }
}
