//! One-shot header disambiguation.
//!
//! A `.h` file is C or C++ depending on what is in it. This module settles
//! the tag with a bounded lexical scan: a token preview is searched for
//! C++-only markers, and the tag is revised at most once. The pipeline
//! applies this transition exactly once, so a tag can never oscillate.

use crate::ingest::classify::LanguageTag;
use crate::ingest::IngestOptions;
use crate::lex::{Lexer, LexMode, TokenKind};

/// Resolve an ambiguous header tag from content.
///
/// Non-ambiguous tags pass through unchanged. For
/// [`LanguageTag::AmbiguousHeader`], lex a preview (at most
/// `options.preview_tokens` significant tokens from the first
/// `options.preview_bytes` bytes) with the C++ lexer and decide:
///
/// - any of `class`, `namespace`, `template`, `::`, `extern "C++"` found:
///   the header is C++;
/// - else an `extern "C"` guard found: the header is C;
/// - else it stays ambiguous, and extraction proceeds with the more
///   permissive C++ tokenizer, C being lexically a subset.
pub fn disambiguate(tag: LanguageTag, source: &str, options: &IngestOptions) -> LanguageTag {
    if tag != LanguageTag::AmbiguousHeader {
        return tag;
    }

    let mut end = options.preview_bytes.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let preview = &source[..end];

    let mut lexer = Lexer::new(preview, LexMode::Cpp);
    let mut saw_extern = false;
    let mut extern_c_guard = false;

    for token in lexer.by_ref().filter(|t| !t.is_trivia()).take(options.preview_tokens) {
        let text = token.text(preview);
        match token.kind {
            TokenKind::Keyword => match text {
                "class" | "namespace" | "template" => {
                    log::debug!("header retagged cpp on keyword `{text}`");
                    return LanguageTag::Cpp;
                }
                "extern" => {
                    saw_extern = true;
                    continue;
                }
                _ => {}
            },
            TokenKind::Punct if text == "::" => {
                log::debug!("header retagged cpp on `::`");
                return LanguageTag::Cpp;
            }
            TokenKind::Str if saw_extern => {
                if text.contains("C++") {
                    log::debug!("header retagged cpp on extern \"C++\"");
                    return LanguageTag::Cpp;
                }
                if text == "\"C\"" {
                    extern_c_guard = true;
                }
            }
            _ => {}
        }
        saw_extern = false;
    }

    if extern_c_guard {
        log::debug!("header retagged c on extern \"C\" guard");
        LanguageTag::C
    } else {
        LanguageTag::AmbiguousHeader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> IngestOptions {
        IngestOptions::default()
    }

    #[test]
    fn test_class_marker_retags_cpp() {
        let source = "class Foo {};\n";
        assert_eq!(
            disambiguate(LanguageTag::AmbiguousHeader, source, &options()),
            LanguageTag::Cpp
        );
    }

    #[test]
    fn test_namespace_marker_retags_cpp() {
        let source = "namespace util { void helper(); }\n";
        assert_eq!(
            disambiguate(LanguageTag::AmbiguousHeader, source, &options()),
            LanguageTag::Cpp
        );
    }

    #[test]
    fn test_scope_resolution_retags_cpp() {
        let source = "void f(std::size_t n);\n";
        assert_eq!(
            disambiguate(LanguageTag::AmbiguousHeader, source, &options()),
            LanguageTag::Cpp
        );
    }

    #[test]
    fn test_extern_c_guard_retags_c() {
        let source = concat!(
            "#ifdef __cplusplus\n",
            "extern \"C\" {\n",
            "#endif\n",
            "int parse(const char* input);\n",
            "#ifdef __cplusplus\n",
            "}\n",
            "#endif\n",
        );
        assert_eq!(
            disambiguate(LanguageTag::AmbiguousHeader, source, &options()),
            LanguageTag::C
        );
    }

    #[test]
    fn test_extern_cpp_retags_cpp() {
        let source = "extern \"C++\" { void f(); }\n";
        assert_eq!(
            disambiguate(LanguageTag::AmbiguousHeader, source, &options()),
            LanguageTag::Cpp
        );
    }

    #[test]
    fn test_plain_header_stays_ambiguous() {
        let source = "#define LIMIT 8\nint parse(const char* input);\n";
        assert_eq!(
            disambiguate(LanguageTag::AmbiguousHeader, source, &options()),
            LanguageTag::AmbiguousHeader
        );
    }

    #[test]
    fn test_cpp_marker_wins_over_extern_c() {
        // Mixed header: extern "C" block plus a class. C++ wins.
        let source = "extern \"C\" { void f(); }\nclass Wrapper {};\n";
        assert_eq!(
            disambiguate(LanguageTag::AmbiguousHeader, source, &options()),
            LanguageTag::Cpp
        );
    }

    #[test]
    fn test_non_ambiguous_tags_pass_through() {
        let source = "class Foo {};\n";
        assert_eq!(
            disambiguate(LanguageTag::C, source, &options()),
            LanguageTag::C
        );
        assert_eq!(
            disambiguate(LanguageTag::Unknown, source, &options()),
            LanguageTag::Unknown
        );
    }

    #[test]
    fn test_marker_outside_preview_budget_is_ignored() {
        let mut source = String::new();
        for i in 0..3000 {
            source.push_str(&format!("int field_{i};\n"));
        }
        source.push_str("class Late {};\n");
        assert_eq!(
            disambiguate(LanguageTag::AmbiguousHeader, &source, &options()),
            LanguageTag::AmbiguousHeader
        );
    }
}
