//! Uniform symbol model shared across languages.
//!
//! Every language branch of the extractor produces the same [`Symbol`]
//! shape, so downstream indexing consumes one model regardless of grammar.
//! Text is referenced by byte span into the original content; owned strings
//! are limited to names and nesting paths.

use crate::error::{IngestError, Result};
use crate::ingest::classify::LanguageTag;
use crate::lex::Span;
use serde::{Deserialize, Serialize};

/// Kinds of extracted symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Free function, method, or prototype.
    Function,
    /// `struct` definition or forward declaration.
    Struct,
    /// `class` definition or forward declaration.
    Class,
    /// `enum` definition or forward declaration.
    Enum,
    /// `namespace` block.
    Namespace,
    /// `typedef` or `using` alias.
    Typedef,
    /// `#define` macro.
    Macro,
    /// File- or namespace-scope variable.
    Variable,
}

impl SymbolKind {
    /// Convert to string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Struct => "struct",
            SymbolKind::Class => "class",
            SymbolKind::Enum => "enum",
            SymbolKind::Namespace => "namespace",
            SymbolKind::Typedef => "typedef",
            SymbolKind::Macro => "macro",
            SymbolKind::Variable => "variable",
        }
    }
}

/// Member visibility.
///
/// `None` on a [`Symbol`] means the language defines no visibility there:
/// all of C, and C++ file scope. Inside C++ aggregates the default is
/// `private` for `class` and `public` for `struct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// `public:` member, or any `struct` member before an access label.
    Public,
    /// `private:` member, or any `class` member before an access label.
    Private,
    /// `protected:` member.
    Protected,
    /// Declaration inside an `extern "C"` / `extern "C++"` block.
    Extern,
}

impl Visibility {
    /// Convert to string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Extern => "extern",
        }
    }
}

/// A comment classified as documentation.
///
/// Attached to the next declaration by adjacency: intervening whitespace and
/// ordinary comments are allowed, any other token breaks the attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    /// Byte span of the comment, markers included.
    pub span: Span,
}

impl DocComment {
    /// Borrow the comment text from the original source.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}

/// A single extracted symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Local symbol name (e.g. `addUser`).
    pub name: String,

    /// Symbol kind.
    pub kind: SymbolKind,

    /// Byte span of the whole declaration, doc comment excluded.
    pub span: Span,

    /// Declaration head for functions: return type through parameter list
    /// and trailing qualifiers, body excluded. Slicing this span out of the
    /// source recovers the exact signature text.
    pub signature: Option<Span>,

    /// Raw parameter list text between the parens, not parsed further.
    /// Present on functions and function-like macros.
    pub params: Option<Span>,

    /// Raw member list text between the braces of an aggregate body,
    /// not parsed further.
    pub members: Option<Span>,

    /// Documentation comment attached by adjacency.
    pub doc: Option<DocComment>,

    /// Nesting path, outermost first (e.g. `["sample", "UserService"]`).
    pub path: Vec<String>,

    /// Fully qualified name (e.g. `sample::UserService::addUser`).
    pub fully_qualified: String,

    /// Visibility, where the language defines one.
    pub visibility: Option<Visibility>,

    /// Whether the declaration carries a body (`{ ... }`). Prototypes and
    /// forward declarations are `false`.
    pub has_body: bool,

    /// Start line (1-based).
    pub line_start: usize,

    /// End line (1-based).
    pub line_end: usize,
}

/// Warning categories attached to an [`ExtractionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Block comment open at end of file.
    UnterminatedComment,
    /// String or character literal broken by newline or end of file.
    UnterminatedString,
    /// `#if`/`#ifdef` without a matching `#endif` at end of file.
    UnterminatedConditional,
    /// Template bracket guess abandoned at scope punctuation.
    AmbiguousTemplate,
    /// `{` without a matching `}` at end of file; extraction truncated.
    UnmatchedBrace,
    /// Content was not valid UTF-8; the file was skipped.
    InvalidUtf8,
    /// File exceeded the configured size limit and was skipped.
    FileTooLarge,
}

impl WarningKind {
    /// Convert to string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::UnterminatedComment => "unterminated_comment",
            WarningKind::UnterminatedString => "unterminated_string",
            WarningKind::UnterminatedConditional => "unterminated_conditional",
            WarningKind::AmbiguousTemplate => "ambiguous_template",
            WarningKind::UnmatchedBrace => "unmatched_brace",
            WarningKind::InvalidUtf8 => "invalid_utf8",
            WarningKind::FileTooLarge => "file_too_large",
        }
    }
}

/// Non-fatal issue found while processing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Warning category.
    pub kind: WarningKind,

    /// Byte offset where the issue was detected.
    pub offset: usize,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at byte {}", self.kind.as_str(), self.offset)
    }
}

/// Per-file extraction output: ordered symbols, final language tag, and
/// any non-fatal warnings. Pure data, constructed once per file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Source path as handed in by the file walker.
    pub path: String,

    /// Final language decision, disambiguation applied.
    pub language: LanguageTag,

    /// Symbols in source declaration order, never reordered.
    pub symbols: Vec<Symbol>,

    /// Non-fatal warnings, in detection order.
    pub warnings: Vec<Warning>,

    /// SHA-256 of the file content, hex encoded.
    pub sha256: String,

    /// Content size in bytes.
    pub bytes: usize,

    /// Number of lines in the content.
    pub line_count: usize,
}

impl ExtractionResult {
    /// Verify that every symbol span (and its sub-spans) lies within the
    /// content bounds. Violations are internal bugs, reported as
    /// [`IngestError::InvalidSpan`].
    pub fn verify_spans(&self, content_len: usize) -> Result<()> {
        for symbol in &self.symbols {
            let mut spans = vec![symbol.span];
            spans.extend(symbol.signature);
            spans.extend(symbol.params);
            spans.extend(symbol.members);
            spans.extend(symbol.doc.map(|d| d.span));
            for span in spans {
                if span.start > span.end || span.end > content_len {
                    return Err(IngestError::InvalidSpan {
                        path: self.path.clone(),
                        start: span.start,
                        end: span.end,
                    });
                }
            }
        }
        Ok(())
    }

    /// Serialize the result as pretty JSON for an external consumer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
