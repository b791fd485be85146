//! Language-tag dispatch for the lexing and extraction stages.
//!
//! Dispatch is a match over [`LanguageTag`], not a trait hierarchy: each tag
//! selects a lexer mode, and every tag runs the same structural extractor.
//! Unknown files still go through the pipeline with the generic tokenizer,
//! best effort, never an error.

use crate::extract::extract;
use crate::ingest::classify::LanguageTag;
use crate::ingest::IngestOptions;
use crate::lex::{tokenize, LexMode};
use crate::symbol::{Symbol, Warning};

/// Lexer mode for a (final, disambiguated) language tag.
///
/// An unresolved ambiguous header lexes as C++: C is lexically a subset, so
/// the superset mode tokenizes both correctly.
pub fn lex_mode_for(tag: LanguageTag) -> LexMode {
    match tag {
        LanguageTag::C => LexMode::C,
        LanguageTag::Cpp | LanguageTag::AmbiguousHeader => LexMode::Cpp,
        LanguageTag::Unknown => LexMode::Generic,
    }
}

/// Tokenize and extract one file's content under the given tag.
///
/// Returns the symbols in declaration order plus the merged lexical and
/// structural warnings, lexical first.
pub fn extract_tagged(
    source: &str,
    tag: LanguageTag,
    options: &IngestOptions,
) -> (Vec<Symbol>, Vec<Warning>) {
    let (tokens, mut warnings) = tokenize(source, lex_mode_for(tag));
    let (symbols, extract_warnings) = extract(source, &tokens, tag, options);
    warnings.extend(extract_warnings);
    (symbols, warnings)
}
