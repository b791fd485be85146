//! Single-pass lexers for the C language family.
//!
//! The lexer is lazy: it implements `Iterator<Item = Token>` and produces
//! tokens in one left-to-right pass, so callers that only need a preview
//! (the header disambiguator) stop early without paying for the whole file.
//! It is restartable per file but not resumable mid-stream.
//!
//! Malformed input never fails the lexer. Unterminated comments, literals,
//! and conditionals are recorded as warnings and the stream continues or
//! truncates at the break point.

pub mod token;

pub use token::{Span, Token, TokenKind};

use crate::symbol::{Warning, WarningKind};

/// C keywords (C11, plus the common storage/type specifiers).
const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do",
    "double", "else", "enum", "extern", "float", "for", "goto", "if",
    "inline", "int", "long", "register", "restrict", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union",
    "unsigned", "void", "volatile", "while",
];

/// Additional C++ keywords on top of [`C_KEYWORDS`].
const CPP_KEYWORDS: &[&str] = &[
    "bool", "catch", "class", "const_cast", "constexpr", "decltype",
    "delete", "dynamic_cast", "explicit", "false", "friend", "mutable",
    "namespace", "new", "noexcept", "nullptr", "operator", "private",
    "protected", "public", "reinterpret_cast", "static_cast", "template",
    "this", "throw", "true", "try", "typename", "using", "virtual",
];

/// Lexer dialect selection.
///
/// C is lexically a subset of C++, so ambiguous headers are lexed in
/// [`LexMode::Cpp`]. [`LexMode::Generic`] is the fallback for unclassified
/// files: comment- and string-aware only, no keywords, no directives, no
/// template brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexMode {
    /// C: directives, C keyword set, no template brackets.
    C,
    /// C++: directives, full keyword set, template bracket tracking.
    Cpp,
    /// Unknown language: comments, strings, words, punctuation.
    Generic,
}

impl LexMode {
    fn is_keyword(&self, word: &str) -> bool {
        match self {
            LexMode::C => C_KEYWORDS.contains(&word),
            LexMode::Cpp => C_KEYWORDS.contains(&word) || CPP_KEYWORDS.contains(&word),
            LexMode::Generic => false,
        }
    }

    fn has_directives(&self) -> bool {
        matches!(self, LexMode::C | LexMode::Cpp)
    }

    fn tracks_angles(&self) -> bool {
        matches!(self, LexMode::Cpp)
    }
}

/// What the previous significant token was, as far as the template-angle
/// heuristic cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AngleContext {
    None,
    /// An identifier: `vector` in `vector<int>`.
    Ident,
    /// The `template` keyword itself.
    TemplateKeyword,
}

/// Lazy tokenizer over a single file's content.
pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    mode: LexMode,
    /// True once a non-whitespace token has been produced on the current
    /// line. Directives only start a line.
    line_has_token: bool,
    angle_context: AngleContext,
    angle_depth: usize,
    /// Offset of the outermost open template bracket.
    angle_open: usize,
    /// `#if`/`#ifdef`/`#ifndef` nesting depth.
    cond_depth: usize,
    /// Offset of the outermost open conditional directive.
    cond_open: usize,
    warnings: Vec<Warning>,
    eof_flushed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source` in the given mode.
    pub fn new(source: &'a str, mode: LexMode) -> Self {
        Self {
            src: source,
            bytes: source.as_bytes(),
            pos: 0,
            mode,
            line_has_token: false,
            angle_context: AngleContext::None,
            angle_depth: 0,
            angle_open: 0,
            cond_depth: 0,
            cond_open: 0,
            warnings: Vec::new(),
            eof_flushed: false,
        }
    }

    /// Take the warnings accumulated so far.
    ///
    /// Only complete after the iterator has been exhausted; end-of-file
    /// conditions (open conditionals, open template brackets) are flushed
    /// when the stream ends.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Current `#if` nesting depth.
    pub fn conditional_depth(&self) -> usize {
        self.cond_depth
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn warn(&mut self, kind: WarningKind, offset: usize) {
        self.warnings.push(Warning { kind, offset });
    }

    fn token(&mut self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            span: Span::new(start, self.pos),
        }
    }

    fn lex_whitespace(&mut self) -> Token {
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            if !b.is_ascii_whitespace() {
                break;
            }
            if b == b'\n' {
                self.line_has_token = false;
            }
            self.pos += 1;
        }
        self.token(TokenKind::Whitespace, start)
    }

    /// Opaque directive token: `#` through end of line, honoring `\`
    /// line continuations. Conditional nesting depth is tracked here.
    fn lex_directive(&mut self) -> Token {
        let start = self.pos;
        self.pos += 1; // '#'
        loop {
            match self.peek(0) {
                None => break,
                Some(b'\n') => {
                    // Continuation if the last non-CR byte was a backslash.
                    let mut back = self.pos;
                    if back > start && self.bytes[back - 1] == b'\r' {
                        back -= 1;
                    }
                    if back > start && self.bytes[back - 1] == b'\\' {
                        self.pos += 1;
                        continue;
                    }
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        self.angle_context = AngleContext::None;
        let token = self.token(TokenKind::Directive, start);
        self.track_conditional(token.span);
        token
    }

    fn track_conditional(&mut self, span: Span) {
        let body = span.text(self.src)[1..].trim_start();
        let name: String = body
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        match name.as_str() {
            "if" | "ifdef" | "ifndef" => {
                if self.cond_depth == 0 {
                    self.cond_open = span.start;
                }
                self.cond_depth += 1;
            }
            "endif" => {
                self.cond_depth = self.cond_depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn lex_line_comment(&mut self) -> Token {
        let start = self.pos;
        self.pos += 2;
        while let Some(b) = self.peek(0) {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
        self.token(TokenKind::Comment, start)
    }

    fn lex_block_comment(&mut self) -> Token {
        let start = self.pos;
        self.pos += 2;
        loop {
            match self.peek(0) {
                None => {
                    self.warn(WarningKind::UnterminatedComment, start);
                    break;
                }
                Some(b'*') if self.peek(1) == Some(b'/') => {
                    self.pos += 2;
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        self.token(TokenKind::Comment, start)
    }

    /// String or character literal. Escape sequences are honored, so an
    /// embedded `//` or `/*` never reads as a comment start. An unterminated
    /// literal truncates at the newline or end of file with a warning.
    fn lex_quoted(&mut self, quote: u8, kind: TokenKind) -> Token {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None => {
                    self.warn(WarningKind::UnterminatedString, start);
                    break;
                }
                Some(b'\n') => {
                    self.warn(WarningKind::UnterminatedString, start);
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    if self.peek(0).is_some() {
                        self.pos += 1;
                    }
                }
                Some(b) if b == quote => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        self.angle_context = AngleContext::None;
        self.token(kind, start)
    }

    fn lex_word(&mut self) -> Token {
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            if b == b'_' || b.is_ascii_alphanumeric() {
                self.pos += 1;
            } else {
                break;
            }
        }
        let word = &self.src[start..self.pos];
        let kind = if self.mode.is_keyword(word) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        self.angle_context = match (kind, word) {
            (TokenKind::Keyword, "template") => AngleContext::TemplateKeyword,
            (TokenKind::Ident, _) => AngleContext::Ident,
            _ => AngleContext::None,
        };
        self.token(kind, start)
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            let exponent_sign = (b == b'+' || b == b'-')
                && self.pos > start
                && matches!(self.bytes[self.pos - 1], b'e' | b'E' | b'p' | b'P');
            if b == b'_' || b == b'.' || b.is_ascii_alphanumeric() || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.angle_context = AngleContext::None;
        self.token(TokenKind::Number, start)
    }

    /// Template bracket heuristic: a `<` directly after an identifier (or
    /// the `template` keyword) that is not `<<` or `<=` opens a bracket;
    /// `>` closes while the depth is positive, one token per character so
    /// `>>` closes two levels. Scope punctuation with brackets still open
    /// means the guess was wrong: reset and warn, never fail.
    fn lex_punct(&mut self) -> Token {
        let start = self.pos;
        let b = self.bytes[self.pos];

        if self.mode.tracks_angles() {
            if b == b'<'
                && self.angle_context != AngleContext::None
                && !matches!(self.peek(1), Some(b'<') | Some(b'='))
            {
                self.pos += 1;
                if self.angle_depth == 0 {
                    self.angle_open = start;
                }
                self.angle_depth += 1;
                self.angle_context = AngleContext::None;
                return self.token(TokenKind::TemplateAngle, start);
            }
            if b == b'>' && self.angle_depth > 0 && self.peek(1) != Some(b'=') {
                self.pos += 1;
                self.angle_depth -= 1;
                self.angle_context = AngleContext::None;
                return self.token(TokenKind::TemplateAngle, start);
            }
            if matches!(b, b';' | b'{' | b'}') && self.angle_depth > 0 {
                let open = self.angle_open;
                self.warn(WarningKind::AmbiguousTemplate, open);
                self.angle_depth = 0;
            }
        }

        self.pos += 1;
        if b == b':' && self.peek(0) == Some(b':') {
            self.pos += 1;
        }
        self.angle_context = AngleContext::None;
        self.token(TokenKind::Punct, start)
    }

    fn flush_eof(&mut self) {
        if self.eof_flushed {
            return;
        }
        self.eof_flushed = true;
        if self.angle_depth > 0 {
            let open = self.angle_open;
            self.warn(WarningKind::AmbiguousTemplate, open);
            self.angle_depth = 0;
        }
        if self.cond_depth > 0 {
            let open = self.cond_open;
            self.warn(WarningKind::UnterminatedConditional, open);
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let b = match self.peek(0) {
            Some(b) => b,
            None => {
                self.flush_eof();
                return None;
            }
        };

        if b.is_ascii_whitespace() {
            return Some(self.lex_whitespace());
        }

        let token = match b {
            b'#' if self.mode.has_directives() && !self.line_has_token => self.lex_directive(),
            b'/' if self.peek(1) == Some(b'/') => self.lex_line_comment(),
            b'/' if self.peek(1) == Some(b'*') => self.lex_block_comment(),
            b'"' => self.lex_quoted(b'"', TokenKind::Str),
            b'\'' => self.lex_quoted(b'\'', TokenKind::Char),
            b'_' => self.lex_word(),
            _ if b.is_ascii_alphabetic() => self.lex_word(),
            _ if b.is_ascii_digit() => self.lex_number(),
            b'.' if self.peek(1).is_some_and(|n| n.is_ascii_digit()) => self.lex_number(),
            _ => self.lex_punct(),
        };
        self.line_has_token = true;
        Some(token)
    }
}

/// Tokenize a whole file in one pass.
///
/// Convenience over driving the iterator by hand: returns the full token
/// stream plus any lexical warnings (unterminated comment/string, open
/// conditional, ambiguous template bracket).
pub fn tokenize(source: &str, mode: LexMode) -> (Vec<Token>, Vec<Warning>) {
    let mut lexer = Lexer::new(source, mode);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    (tokens, lexer.take_warnings())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str, mode: LexMode) -> Vec<TokenKind> {
        tokenize(source, mode)
            .0
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_function_tokens() {
        let (tokens, warnings) = tokenize("int foo() { return 42; }", LexMode::C);
        assert!(warnings.is_empty());
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| !t.is_trivia())
            .map(|t| t.text("int foo() { return 42; }"))
            .collect();
        assert_eq!(words, ["int", "foo", "(", ")", "{", "return", "42", ";", "}"]);
    }

    #[test]
    fn test_comment_inside_string_is_not_a_comment() {
        let src = r#"const char* s = "/* not a comment */";"#;
        let (tokens, warnings) = tokenize(src, LexMode::C);
        assert!(warnings.is_empty());
        let strings: Vec<&Token> = tokens.iter().filter(|t| t.kind == TokenKind::Str).collect();
        assert_eq!(strings.len(), 1);
        assert_eq!(strings[0].text(src), "\"/* not a comment */\"");
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Comment));
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let src = r#""a \" b""#;
        let (tokens, warnings) = tokenize(src, LexMode::C);
        assert!(warnings.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].span, Span::new(0, src.len()));
    }

    #[test]
    fn test_unterminated_string_warns() {
        let (_, warnings) = tokenize("char* s = \"oops\nint x;", LexMode::C);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnterminatedString);
        assert_eq!(warnings[0].offset, 10);
    }

    #[test]
    fn test_unterminated_block_comment_warns() {
        let (tokens, warnings) = tokenize("int x; /* trailing", LexMode::C);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnterminatedComment);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Comment);
    }

    #[test]
    fn test_directive_is_opaque() {
        let src = "#include <stdio.h>\nint x;";
        let (tokens, warnings) = tokenize(src, LexMode::C);
        assert!(warnings.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].text(src), "#include <stdio.h>");
    }

    #[test]
    fn test_directive_continuation() {
        let src = "#define PAIR(a, b) \\\n    { a, b }\nint x;";
        let (tokens, _) = tokenize(src, LexMode::C);
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert!(tokens[0].text(src).ends_with("{ a, b }"));
    }

    #[test]
    fn test_conditional_depth_balanced() {
        let src = "#ifdef A\n#ifdef B\n#endif\n#endif\n";
        let (_, warnings) = tokenize(src, LexMode::C);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_open_conditional_warns_at_eof() {
        let src = "#ifdef NEVER_CLOSED\nint x;\n";
        let (_, warnings) = tokenize(src, LexMode::C);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnterminatedConditional);
        assert_eq!(warnings[0].offset, 0);
    }

    #[test]
    fn test_template_angles_tracked_in_cpp() {
        let src = "std::vector<int> v;";
        let (tokens, warnings) = tokenize(src, LexMode::Cpp);
        assert!(warnings.is_empty());
        let angles: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::TemplateAngle)
            .collect();
        assert_eq!(angles.len(), 2);
    }

    #[test]
    fn test_nested_template_close_with_double_angle() {
        let src = "std::vector<std::pair<int, int>> v;";
        let (_, warnings) = tokenize(src, LexMode::Cpp);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_comparison_does_not_open_angle_in_c() {
        let src = "int y = a < b;";
        let (tokens, warnings) = tokenize(src, LexMode::C);
        assert!(warnings.is_empty());
        assert!(tokens.iter().all(|t| t.kind != TokenKind::TemplateAngle));
    }

    #[test]
    fn test_ambiguous_angle_warns_and_recovers() {
        // `a < b` looks like an open template bracket until the `;`.
        let src = "bool y = a < b; int z;";
        let (_, warnings) = tokenize(src, LexMode::Cpp);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::AmbiguousTemplate);
    }

    #[test]
    fn test_left_shift_is_not_an_angle() {
        let src = "x << 2;";
        let (tokens, warnings) = tokenize(src, LexMode::Cpp);
        assert!(warnings.is_empty());
        assert!(tokens.iter().all(|t| t.kind != TokenKind::TemplateAngle));
    }

    #[test]
    fn test_scope_resolution_is_one_token() {
        let src = "ns::value";
        let (tokens, _) = tokenize(src, LexMode::Cpp);
        let puncts: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Punct)
            .map(|t| t.text(src))
            .collect();
        assert_eq!(puncts, ["::"]);
    }

    #[test]
    fn test_generic_mode_has_no_keywords_or_directives() {
        assert_eq!(
            kinds("#define X class", LexMode::Generic),
            [
                TokenKind::Punct,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident
            ]
        );
    }

    #[test]
    fn test_char_literal_with_escape() {
        let src = r"char c = '\0';";
        let (tokens, warnings) = tokenize(src, LexMode::C);
        assert!(warnings.is_empty());
        let chars: Vec<&Token> = tokens.iter().filter(|t| t.kind == TokenKind::Char).collect();
        assert_eq!(chars.len(), 1);
        assert_eq!(chars[0].text(src), r"'\0'");
    }

    #[test]
    fn test_spans_cover_source_exactly() {
        let src = "int main(void) {\n    return 0;\n}\n";
        let (tokens, _) = tokenize(src, LexMode::C);
        let mut pos = 0;
        for token in &tokens {
            assert_eq!(token.span.start, pos, "gap before {:?}", token);
            pos = token.span.end;
        }
        assert_eq!(pos, src.len());
    }
}
