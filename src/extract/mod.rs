//! Structural symbol extraction.
//!
//! A shallow brace-depth state machine over the token stream, not a grammar
//! parser. Statements are scanned at scope level; function bodies are
//! skipped by depth tracking, aggregate bodies are scanned recursively with
//! the nesting path pushed. Malformed input truncates extraction at the
//! failure point and keeps everything found so far.

use crate::ingest::classify::LanguageTag;
use crate::ingest::IngestOptions;
use crate::lex::{Span, Token, TokenKind};
use crate::symbol::{DocComment, Symbol, SymbolKind, Visibility, Warning, WarningKind};
use ropey::Rope;

/// Extract symbols from a tokenized file.
///
/// `tokens` must be the full stream produced by the lexer for `source`
/// (trivia included; the extractor needs comments for doc attachment).
/// Returns symbols in source declaration order plus structural warnings.
/// The language tag only matters for visibility defaults; token-level
/// dialect differences were already settled by the lexer mode.
pub fn extract(
    source: &str,
    tokens: &[Token],
    tag: LanguageTag,
    options: &IngestOptions,
) -> (Vec<Symbol>, Vec<Warning>) {
    let mut extractor = Extractor {
        src: source,
        tokens,
        pos: 0,
        tag,
        doc_markers: &options.doc_markers,
        symbols: Vec::new(),
        warnings: Vec::new(),
        pending_doc: None,
        unmatched_brace: None,
        path: Vec::new(),
        rope: Rope::from_str(source),
    };

    // A stray top-level `}` ends one scan harmlessly; keep going until the
    // token stream is exhausted.
    loop {
        match extractor.scan_scope(Scope::File, None) {
            ScopeEnd::Brace(_) => continue,
            ScopeEnd::Eof => break,
        }
    }

    if let Some(offset) = extractor.unmatched_brace {
        extractor.warnings.push(Warning {
            kind: WarningKind::UnmatchedBrace,
            offset,
        });
    }

    (extractor.symbols, extractor.warnings)
}

/// What kind of scope the scanner is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// File level, or a namespace body.
    File,
    /// Class/struct body: members carry visibility, data fields are not
    /// individual symbols.
    Aggregate,
}

/// How a scope scan ended.
enum ScopeEnd {
    /// Matching `}` consumed; token index of the brace.
    Brace(usize),
    /// Ran out of tokens.
    Eof,
}

/// How one statement scan ended.
enum Outcome {
    Continue,
    ScopeEnd(usize),
    Eof,
}

/// How a scan for a terminating `;` ended.
enum Term {
    Semi(usize),
    Close(usize),
    Eof,
}

struct Extractor<'a> {
    src: &'a str,
    tokens: &'a [Token],
    pos: usize,
    tag: LanguageTag,
    doc_markers: &'a [String],
    symbols: Vec<Symbol>,
    warnings: Vec<Warning>,
    /// Doc comment waiting for the next declaration. Set while skipping
    /// trivia, cleared by any other token.
    pending_doc: Option<Span>,
    /// Offset of the innermost `{` left open at end of file. Set once:
    /// extraction truncates at the first failure point.
    unmatched_brace: Option<usize>,
    path: Vec<String>,
    rope: Rope,
}

impl<'a> Extractor<'a> {
    fn text(&self, index: usize) -> &'a str {
        self.tokens[index].text(self.src)
    }

    fn is_doc(&self, span: Span) -> bool {
        let text = span.text(self.src);
        self.doc_markers.iter().any(|m| text.starts_with(m.as_str()))
    }

    /// Advance over trivia, keeping the doc-attachment state, and return
    /// the index of the next significant token. Does not clear the pending
    /// doc: the caller decides whether this token captures or breaks it.
    fn bump(&mut self) -> Option<usize> {
        while self.pos < self.tokens.len() {
            let index = self.pos;
            let token = self.tokens[index];
            match token.kind {
                TokenKind::Whitespace => self.pos += 1,
                TokenKind::Comment => {
                    if self.is_doc(token.span) {
                        self.pending_doc = Some(token.span);
                    }
                    self.pos += 1;
                }
                _ => {
                    self.pos += 1;
                    return Some(index);
                }
            }
        }
        None
    }

    /// [`Self::bump`] for mid-statement positions: any significant token
    /// here breaks a pending doc attachment.
    fn bump_clearing(&mut self) -> Option<usize> {
        let index = self.bump()?;
        self.pending_doc = None;
        Some(index)
    }

    fn note_unmatched(&mut self, offset: usize) {
        self.unmatched_brace.get_or_insert(offset);
    }

    fn line_of(&self, byte: usize) -> usize {
        let mut byte = byte.min(self.src.len());
        while byte > 0 && !self.src.is_char_boundary(byte) {
            byte -= 1;
        }
        let ch = self.rope.byte_to_char(byte);
        self.rope.char_to_line(ch) + 1
    }

    fn make_symbol(
        &self,
        name: String,
        kind: SymbolKind,
        span: Span,
        doc: Option<Span>,
        visibility: Option<Visibility>,
        has_body: bool,
    ) -> Symbol {
        let fully_qualified = if self.path.is_empty() {
            name.clone()
        } else {
            format!("{}::{}", self.path.join("::"), name)
        };
        let line_end = span.end.saturating_sub(1).max(span.start);
        Symbol {
            name,
            kind,
            span,
            signature: None,
            params: None,
            members: None,
            doc: doc.map(|span| DocComment { span }),
            path: self.path.clone(),
            fully_qualified,
            visibility,
            has_body,
            line_start: self.line_of(span.start),
            line_end: self.line_of(line_end),
        }
    }

    /// Scan statements until the scope's closing `}` or end of input.
    fn scan_scope(&mut self, scope: Scope, mut visibility: Option<Visibility>) -> ScopeEnd {
        loop {
            let Some(index) = self.bump() else {
                return ScopeEnd::Eof;
            };

            if self.tokens[index].kind == TokenKind::Directive {
                let doc = self.pending_doc.take();
                self.handle_directive(index, doc, visibility);
                continue;
            }

            let text = self.text(index);
            if text == "}" {
                self.pending_doc = None;
                return ScopeEnd::Brace(index);
            }
            if text == ";" {
                self.pending_doc = None;
                continue;
            }

            // Access labels switch member visibility inside aggregates.
            if scope == Scope::Aggregate {
                if let Some(access) = match text {
                    "public" => Some(Visibility::Public),
                    "private" => Some(Visibility::Private),
                    "protected" => Some(Visibility::Protected),
                    _ => None,
                } {
                    if let Some(colon) = self.peek_significant() {
                        if self.text(colon) == ":" {
                            self.pos = colon + 1;
                            visibility = Some(access);
                            continue;
                        }
                    }
                }
            }

            let doc = self.pending_doc.take();
            match self.scan_statement(index, doc, scope, visibility) {
                Outcome::Continue => {}
                Outcome::ScopeEnd(close) => return ScopeEnd::Brace(close),
                Outcome::Eof => return ScopeEnd::Eof,
            }
        }
    }

    /// Index of the next significant token without consuming anything.
    fn peek_significant(&self) -> Option<usize> {
        self.tokens[self.pos..]
            .iter()
            .position(|t| !t.is_trivia())
            .map(|offset| self.pos + offset)
    }

    /// Collect one statement head starting at `first` until `{`, `;`, a
    /// stray `}`, or end of input, then classify it.
    fn scan_statement(
        &mut self,
        first: usize,
        doc: Option<Span>,
        scope: Scope,
        visibility: Option<Visibility>,
    ) -> Outcome {
        let mut head = vec![first];
        if self.text(first) == "{" {
            // Anonymous block: skip it opaquely.
            return match self.skip_braces(first) {
                Some(_) => Outcome::Continue,
                None => Outcome::Eof,
            };
        }

        loop {
            let Some(index) = self.bump_clearing() else {
                return Outcome::Eof;
            };
            if self.tokens[index].kind == TokenKind::Directive {
                continue;
            }
            match self.text(index) {
                "{" => return self.finish_block(head, index, doc, scope, visibility),
                ";" => {
                    self.finish_simple(&head, index, doc, scope, visibility);
                    return Outcome::Continue;
                }
                "}" => return Outcome::ScopeEnd(index),
                _ => head.push(index),
            }
        }
    }

    /// Statement head followed by `{`.
    fn finish_block(
        &mut self,
        head: Vec<usize>,
        brace: usize,
        doc: Option<Span>,
        scope: Scope,
        visibility: Option<Visibility>,
    ) -> Outcome {
        let rest = self.strip_template_prefix(&head);
        if rest.is_empty() {
            return match self.skip_braces(brace) {
                Some(_) => Outcome::Continue,
                None => Outcome::Eof,
            };
        }
        let lead = self.text(rest[0]);

        match lead {
            "namespace" => self.finish_namespace(&head, brace, doc),
            "extern" if rest.len() == 2 && self.tokens[rest[1]].kind == TokenKind::Str => {
                // extern "C" / extern "C++" block: transparent scope.
                match self.scan_scope(scope, Some(Visibility::Extern)) {
                    ScopeEnd::Brace(_) => Outcome::Continue,
                    ScopeEnd::Eof => {
                        self.note_unmatched(self.tokens[brace].span.start);
                        Outcome::Eof
                    }
                }
            }
            "typedef" => self.finish_typedef_block(&head, brace, doc, visibility),
            "class" | "struct" | "union" | "enum" => {
                self.finish_aggregate(&head, rest, brace, doc, visibility)
            }
            _ => {
                if let Some(paren) = self.find_function_head(rest) {
                    self.finish_function(&head, rest, paren, brace, doc, visibility)
                } else if head.iter().any(|&i| self.text(i) == "=") {
                    // Brace initializer: skip it, then finish the
                    // declaration at its `;`.
                    match self.skip_braces(brace) {
                        Some(_) => {}
                        None => return Outcome::Eof,
                    }
                    match self.consume_to_semicolon() {
                        Term::Semi(semi) => {
                            self.finish_simple(&head, semi, doc, scope, visibility);
                            Outcome::Continue
                        }
                        Term::Close(close) => Outcome::ScopeEnd(close),
                        Term::Eof => Outcome::Eof,
                    }
                } else {
                    // Unrecognized block. Skip and move on.
                    match self.skip_braces(brace) {
                        Some(_) => Outcome::Continue,
                        None => Outcome::Eof,
                    }
                }
            }
        }
    }

    fn finish_namespace(&mut self, head: &[usize], brace: usize, doc: Option<Span>) -> Outcome {
        let name = head[1..]
            .iter()
            .find(|&&i| self.tokens[i].kind == TokenKind::Ident)
            .map(|&i| self.text(i).to_string());

        let Some(name) = name else {
            // Anonymous namespace: contents stay at the current path.
            return match self.scan_scope(Scope::File, None) {
                ScopeEnd::Brace(_) => Outcome::Continue,
                ScopeEnd::Eof => {
                    self.note_unmatched(self.tokens[brace].span.start);
                    Outcome::Eof
                }
            };
        };

        let start = self.tokens[head[0]].span.start;
        let reserved = self.symbols.len();
        let placeholder = Span::new(start, self.tokens[brace].span.end);
        let symbol = self.make_symbol(name.clone(), SymbolKind::Namespace, placeholder, doc, None, true);
        self.symbols.push(symbol);

        self.path.push(name);
        let end = self.scan_scope(Scope::File, None);
        self.path.pop();

        match end {
            ScopeEnd::Brace(close) => {
                self.patch_span(reserved, self.tokens[close].span.end, brace, close);
                Outcome::Continue
            }
            ScopeEnd::Eof => {
                self.note_unmatched(self.tokens[brace].span.start);
                self.patch_span(reserved, self.src.len(), brace, self.tokens.len());
                Outcome::Eof
            }
        }
    }

    /// `typedef struct { ... } Name;` and friends: the body is opaque,
    /// the name is the last identifier before the terminating `;`.
    fn finish_typedef_block(
        &mut self,
        head: &[usize],
        brace: usize,
        doc: Option<Span>,
        visibility: Option<Visibility>,
    ) -> Outcome {
        let close = match self.skip_braces(brace) {
            Some(close) => close,
            None => return Outcome::Eof,
        };
        let (trailing, term) = self.collect_to_semicolon();
        let semi = match term {
            Term::Semi(semi) => semi,
            Term::Close(at) => return Outcome::ScopeEnd(at),
            Term::Eof => return Outcome::Eof,
        };
        let name = trailing
            .iter()
            .rev()
            .find(|&&i| self.tokens[i].kind == TokenKind::Ident)
            .map(|&i| self.text(i).to_string());
        if let Some(name) = name {
            let span = Span::new(self.tokens[head[0]].span.start, self.tokens[semi].span.end);
            let mut symbol = self.make_symbol(name, SymbolKind::Typedef, span, doc, visibility, true);
            symbol.members = Some(Span::new(
                self.tokens[brace].span.end,
                self.tokens[close].span.start,
            ));
            self.symbols.push(symbol);
        }
        Outcome::Continue
    }

    fn finish_aggregate(
        &mut self,
        head: &[usize],
        rest: &[usize],
        brace: usize,
        doc: Option<Span>,
        visibility: Option<Visibility>,
    ) -> Outcome {
        let lead = self.text(rest[0]);
        let name = rest[1..]
            .iter()
            .find(|&&i| self.tokens[i].kind == TokenKind::Ident)
            .map(|&i| self.text(i).to_string());

        let (kind, member_default) = match lead {
            "class" => (SymbolKind::Class, Some(Visibility::Private)),
            "struct" | "union" => (SymbolKind::Struct, Some(Visibility::Public)),
            _ => (SymbolKind::Enum, None),
        };

        // Enum bodies are opaque: enumerators are not individual symbols.
        if kind == SymbolKind::Enum {
            let close = match self.skip_braces(brace) {
                Some(close) => close,
                None => return Outcome::Eof,
            };
            let end = self.consume_optional_semicolon(close);
            if let Some(name) = name {
                let span = Span::new(self.tokens[head[0]].span.start, end);
                let mut symbol = self.make_symbol(name, kind, span, doc, visibility, true);
                symbol.members = Some(Span::new(
                    self.tokens[brace].span.end,
                    self.tokens[close].span.start,
                ));
                self.symbols.push(symbol);
            }
            return Outcome::Continue;
        }

        let Some(name) = name else {
            // Anonymous aggregate: skip the body; a trailing declarator, if
            // any, is left for the next statement scan.
            return match self.skip_braces(brace) {
                Some(_) => Outcome::Continue,
                None => Outcome::Eof,
            };
        };

        // C has no member visibility. Only C++ aggregates default members.
        let member_visibility = if self.tag == LanguageTag::C {
            None
        } else {
            member_default
        };

        let start = self.tokens[head[0]].span.start;
        let reserved = self.symbols.len();
        let placeholder = Span::new(start, self.tokens[brace].span.end);
        let symbol = self.make_symbol(name.clone(), kind, placeholder, doc, visibility, true);
        self.symbols.push(symbol);

        self.path.push(name);
        let end = self.scan_scope(Scope::Aggregate, member_visibility);
        self.path.pop();

        match end {
            ScopeEnd::Brace(close) => {
                let span_end = self.consume_optional_semicolon(close);
                self.symbols[reserved].span.end = span_end;
                self.symbols[reserved].members = Some(Span::new(
                    self.tokens[brace].span.end,
                    self.tokens[close].span.start,
                ));
                self.symbols[reserved].line_end = self.line_of(span_end.saturating_sub(1));
                Outcome::Continue
            }
            ScopeEnd::Eof => {
                self.note_unmatched(self.tokens[brace].span.start);
                self.patch_span(reserved, self.src.len(), brace, self.tokens.len());
                Outcome::Eof
            }
        }
    }

    fn finish_function(
        &mut self,
        head: &[usize],
        rest: &[usize],
        paren: usize,
        brace: usize,
        doc: Option<Span>,
        visibility: Option<Visibility>,
    ) -> Outcome {
        let close = self.skip_braces(brace);
        let span_end = match close {
            Some(close) => self.tokens[close].span.end,
            None => {
                self.note_unmatched(self.tokens[brace].span.start);
                self.src.len()
            }
        };

        let name_index = rest[paren - 1];
        let name = self.text(name_index).to_string();
        let span = Span::new(self.tokens[head[0]].span.start, span_end);
        let mut symbol = self.make_symbol(name, SymbolKind::Function, span, doc, visibility, true);
        symbol.signature = Some(Span::new(
            self.tokens[head[0]].span.start,
            self.tokens[*head.last().unwrap()].span.end,
        ));
        symbol.params = self.param_span(rest, paren);
        self.symbols.push(symbol);

        match close {
            Some(_) => Outcome::Continue,
            None => Outcome::Eof,
        }
    }

    /// Statement terminated by `;` with no body.
    fn finish_simple(
        &mut self,
        head: &[usize],
        semi: usize,
        doc: Option<Span>,
        scope: Scope,
        visibility: Option<Visibility>,
    ) {
        let rest = self.strip_template_prefix(head);
        if rest.is_empty() {
            return;
        }
        let lead = self.text(rest[0]);
        let span = Span::new(self.tokens[head[0]].span.start, self.tokens[semi].span.end);

        if lead == "typedef" {
            let name = rest[1..]
                .iter()
                .rev()
                .find(|&&i| self.tokens[i].kind == TokenKind::Ident)
                .map(|&i| self.text(i).to_string());
            if let Some(name) = name {
                let symbol = self.make_symbol(name, SymbolKind::Typedef, span, doc, visibility, false);
                self.symbols.push(symbol);
            }
            return;
        }

        if lead == "using" {
            // `using Alias = T;` is a typedef; `using namespace` is not a
            // declaration of anything.
            if rest.iter().any(|&i| self.text(i) == "=") {
                if let Some(&name_index) = rest.get(1) {
                    if self.tokens[name_index].kind == TokenKind::Ident {
                        let name = self.text(name_index).to_string();
                        let symbol =
                            self.make_symbol(name, SymbolKind::Typedef, span, doc, visibility, false);
                        self.symbols.push(symbol);
                    }
                }
            }
            return;
        }

        if matches!(lead, "class" | "struct" | "union" | "enum")
            && rest.len() == 2
            && self.tokens[rest[1]].kind == TokenKind::Ident
        {
            let kind = match lead {
                "class" => SymbolKind::Class,
                "enum" => SymbolKind::Enum,
                _ => SymbolKind::Struct,
            };
            let name = self.text(rest[1]).to_string();
            let symbol = self.make_symbol(name, kind, span, doc, visibility, false);
            self.symbols.push(symbol);
            return;
        }

        if let Some(paren) = self.find_function_head(rest) {
            let name = self.text(rest[paren - 1]).to_string();
            let mut symbol = self.make_symbol(name, SymbolKind::Function, span, doc, visibility, false);
            symbol.signature = Some(Span::new(
                self.tokens[head[0]].span.start,
                self.tokens[*head.last().unwrap()].span.end,
            ));
            symbol.params = self.param_span(rest, paren);
            self.symbols.push(symbol);
            return;
        }

        // Data field inside an aggregate: part of the member span, not a
        // symbol of its own.
        if scope == Scope::Aggregate {
            return;
        }

        let mut name = None;
        for &i in rest {
            let text = self.text(i);
            if text == "=" || text == "[" {
                break;
            }
            if self.tokens[i].kind == TokenKind::Ident {
                name = Some(text.to_string());
            }
        }
        if let Some(name) = name {
            let symbol = self.make_symbol(name, SymbolKind::Variable, span, doc, visibility, false);
            self.symbols.push(symbol);
        }
    }

    /// Function heuristic: the statement declares a function when an
    /// identifier sits immediately before the first `(`, and no top-level
    /// `=` precedes it (that would make the parens part of an initializer).
    fn find_function_head(&self, rest: &[usize]) -> Option<usize> {
        let paren = rest.iter().position(|&i| self.text(i) == "(")?;
        if paren == 0 {
            return None;
        }
        if rest[..paren].iter().any(|&i| self.text(i) == "=") {
            return None;
        }
        if self.tokens[rest[paren - 1]].kind == TokenKind::Ident {
            Some(paren)
        } else {
            None
        }
    }

    /// Raw parameter list span: inside the paren group opening at
    /// `rest[paren]`.
    fn param_span(&self, rest: &[usize], paren: usize) -> Option<Span> {
        let mut depth = 0usize;
        for (offset, &i) in rest[paren..].iter().enumerate() {
            match self.text(i) {
                "(" => depth += 1,
                ")" => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(Span::new(
                            self.tokens[rest[paren]].span.end,
                            self.tokens[rest[paren + offset]].span.start,
                        ));
                    }
                }
                _ => {}
            }
        }
        // Head ended before the paren group closed (e.g. truncated input).
        None
    }

    /// Drop a leading `template < ... >` group from the head view.
    fn strip_template_prefix<'h>(&self, head: &'h [usize]) -> &'h [usize] {
        if head.is_empty() || self.text(head[0]) != "template" {
            return head;
        }
        if head.len() < 2 || self.text(head[1]) != "<" {
            return &head[1..];
        }
        let mut depth = 0usize;
        for (offset, &i) in head[1..].iter().enumerate() {
            match self.text(i) {
                "<" => depth += 1,
                ">" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return &head[2 + offset..];
                    }
                }
                _ => {}
            }
        }
        &[]
    }

    /// Skip a brace-delimited body, `open` being the index of the `{`.
    /// Returns the index of the matching `}`, or `None` at end of input
    /// (recording the unmatched brace).
    fn skip_braces(&mut self, open: usize) -> Option<usize> {
        let mut depth = 1usize;
        loop {
            let Some(index) = self.bump_clearing() else {
                self.note_unmatched(self.tokens[open].span.start);
                return None;
            };
            match self.text(index) {
                "{" => depth += 1,
                "}" => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
        }
    }

    /// Consume up to and including the next `;`, skipping nested brace
    /// groups (initializer lists).
    fn consume_to_semicolon(&mut self) -> Term {
        loop {
            let Some(index) = self.bump_clearing() else {
                return Term::Eof;
            };
            match self.text(index) {
                ";" => return Term::Semi(index),
                "}" => return Term::Close(index),
                "{" => {
                    if self.skip_braces(index).is_none() {
                        return Term::Eof;
                    }
                }
                _ => {}
            }
        }
    }

    /// Like [`Self::consume_to_semicolon`] but collects the significant
    /// tokens seen on the way (trailing declarators of a typedef).
    fn collect_to_semicolon(&mut self) -> (Vec<usize>, Term) {
        let mut collected = Vec::new();
        loop {
            let Some(index) = self.bump_clearing() else {
                return (collected, Term::Eof);
            };
            match self.text(index) {
                ";" => return (collected, Term::Semi(index)),
                "}" => return (collected, Term::Close(index)),
                "{" => {
                    if self.skip_braces(index).is_none() {
                        return (collected, Term::Eof);
                    }
                }
                _ => collected.push(index),
            }
        }
    }

    /// Consume a `;` directly after an aggregate body, if present.
    /// Returns the span end of the declaration either way.
    fn consume_optional_semicolon(&mut self, close: usize) -> usize {
        if let Some(next) = self.peek_significant() {
            if self.text(next) == ";" {
                self.pos = next + 1;
                self.pending_doc = None;
                return self.tokens[next].span.end;
            }
        }
        self.tokens[close].span.end
    }

    /// Fix up a reserved container symbol after its body was scanned.
    fn patch_span(&mut self, reserved: usize, span_end: usize, brace: usize, close: usize) {
        self.symbols[reserved].span.end = span_end;
        self.symbols[reserved].line_end = self.line_of(span_end.saturating_sub(1));
        let members_end = if close < self.tokens.len() {
            self.tokens[close].span.start
        } else {
            self.src.len()
        };
        self.symbols[reserved].members = Some(Span::new(
            self.tokens[brace].span.end,
            members_end.max(self.tokens[brace].span.end),
        ));
    }

    /// `#define` directives become macro symbols; everything else is
    /// opaque to extraction.
    fn handle_directive(&mut self, index: usize, doc: Option<Span>, visibility: Option<Visibility>) {
        let token = self.tokens[index];
        let text = token.text(self.src);
        let body = text[1..].trim_start();
        let Some(after) = body.strip_prefix("define") else {
            return;
        };
        if !after.starts_with(|c: char| c.is_ascii_whitespace()) {
            return;
        }
        let after_trimmed = after.trim_start();
        let name_len = after_trimmed
            .bytes()
            .take_while(|b| *b == b'_' || b.is_ascii_alphanumeric())
            .count();
        if name_len == 0 {
            return;
        }
        let name = &after_trimmed[..name_len];

        // Offsets back into the source for the params span.
        let name_offset = token.span.start + (text.len() - after_trimmed.len()) + name_len;
        let mut symbol = self.make_symbol(
            name.to_string(),
            SymbolKind::Macro,
            token.span,
            doc,
            visibility,
            false,
        );
        let remainder = &after_trimmed[name_len..];
        if let Some(inner) = remainder.strip_prefix('(') {
            let close = inner.find(')').unwrap_or(inner.len());
            symbol.params = Some(Span::new(name_offset + 1, name_offset + 1 + close));
        }
        self.symbols.push(symbol);
    }
}
