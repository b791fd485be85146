//! Language classification from file extensions.
//!
//! Table-driven. Headers are the one place the table cannot decide: a `.h`
//! file is C or C++ depending on content, so it is tagged ambiguous here and
//! settled once by the disambiguator.

use serde::{Deserialize, Serialize};

/// Classification outcome for a file's source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageTag {
    /// C (.c)
    C,
    /// C++ (.cpp, .cc, .cxx)
    Cpp,
    /// Header that could be C or C++ (.h, .hpp, .hh, .hxx)
    AmbiguousHeader,
    /// Unrecognized extension.
    Unknown,
}

impl LanguageTag {
    /// Convert language tag to string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::C => "c",
            LanguageTag::Cpp => "cpp",
            LanguageTag::AmbiguousHeader => "ambiguous_header",
            LanguageTag::Unknown => "unknown",
        }
    }
}

/// Confidence attached to a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// No signal at all (unknown extension).
    Zero,
    /// Extension is ambiguous; content must decide.
    Low,
    /// Extension maps to exactly one language.
    High,
}

/// Classifier output: tag plus confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Initial language tag.
    pub tag: LanguageTag,

    /// How sure the extension table is.
    pub confidence: Confidence,
}

/// Classify a file by extension.
///
/// `declared_extension` overrides the extension taken from `path` when the
/// file walker knows better (renamed temp files, extracted archives). Both
/// are matched case-insensitively. Unknown extensions classify as
/// [`LanguageTag::Unknown`] with zero confidence, never an error; callers
/// may still attempt best-effort extraction with the generic tokenizer.
///
/// # Examples
///
/// ```
/// # use ingestor_core::ingest::classify::{classify, Confidence, LanguageTag};
/// assert_eq!(classify("main.c", None).tag, LanguageTag::C);
/// assert_eq!(classify("util.h", None).confidence, Confidence::Low);
/// assert_eq!(classify("notes.txt", None).tag, LanguageTag::Unknown);
/// ```
pub fn classify(path: &str, declared_extension: Option<&str>) -> Classification {
    let extension = declared_extension
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .or_else(|| extension_of(path))
        .unwrap_or_default();

    let (tag, confidence) = match extension.as_str() {
        "c" => (LanguageTag::C, Confidence::High),
        "cpp" | "cc" | "cxx" => (LanguageTag::Cpp, Confidence::High),
        "h" | "hpp" | "hh" | "hxx" => (LanguageTag::AmbiguousHeader, Confidence::Low),
        _ => (LanguageTag::Unknown, Confidence::Zero),
    };

    Classification { tag, confidence }
}

fn extension_of(path: &str) -> Option<String> {
    let name = path.rsplit(['/', '\\']).next()?;
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            Some(ext.to_ascii_lowercase())
        }
        _ => None,
    }
}
