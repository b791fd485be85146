//! Classify → disambiguate → tokenize → extract pipeline.
//!
//! Each file is processed independently: no shared mutable state crosses
//! file boundaries, so callers may fan files out across worker threads
//! without locking. Within one file the stages run strictly in order, and
//! the disambiguation retag is applied exactly once.

pub mod classify;
pub mod disambiguate;
pub mod dispatch;

use crate::error::{IngestError, Result};
use crate::ingest::classify::classify;
use crate::ingest::disambiguate::disambiguate;
use crate::ingest::dispatch::extract_tagged;
use crate::symbol::{ExtractionResult, Warning, WarningKind};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One file handed in by the external file walker.
///
/// Content arrives already read; this core performs no I/O. The walker is
/// also responsible for rejecting binary files, so content is expected to
/// be UTF-8.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path, used for classification and reporting.
    pub path: String,

    /// Raw byte content.
    pub data: Vec<u8>,

    /// Extension declared by the walker, overriding the one in `path`.
    #[serde(default)]
    pub declared_extension: Option<String>,
}

impl SourceFile {
    /// Convenience constructor for a path-derived extension.
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
            declared_extension: None,
        }
    }
}

/// Tunable pipeline parameters, passed explicitly. No global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Comment prefixes recognized as documentation.
    pub doc_markers: Vec<String>,

    /// Maximum significant tokens the disambiguator previews.
    pub preview_tokens: usize,

    /// Maximum bytes the disambiguator previews.
    pub preview_bytes: usize,

    /// Files larger than this are skipped with a warning.
    pub max_file_bytes: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            doc_markers: vec!["/**".to_string(), "///".to_string(), "//!".to_string()],
            preview_tokens: 2_000,
            preview_bytes: 8 * 1024,
            max_file_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Run the full pipeline on one file.
///
/// Errors only on upstream contract violations (content that is not valid
/// UTF-8). Everything malformed inside the file degrades to warnings on
/// the result; extraction is best effort and never aborts the file.
pub fn ingest_file(file: &SourceFile, options: &IngestOptions) -> Result<ExtractionResult> {
    let source = std::str::from_utf8(&file.data).map_err(|source| IngestError::Utf8 {
        path: file.path.clone(),
        source,
    })?;

    let classification = classify(&file.path, file.declared_extension.as_deref());
    let language = disambiguate(classification.tag, source, options);
    log::debug!(
        "{}: classified {:?} ({:?}), final {:?}",
        file.path,
        classification.tag,
        classification.confidence,
        language
    );

    let (symbols, warnings) = extract_tagged(source, language, options);
    log::debug!(
        "{}: {} symbols, {} warnings",
        file.path,
        symbols.len(),
        warnings.len()
    );

    let result = ExtractionResult {
        path: file.path.clone(),
        language,
        symbols,
        warnings,
        sha256: sha256_hex(&file.data),
        bytes: file.data.len(),
        line_count: source.lines().count().max(1),
    };
    result.verify_spans(source.len())?;
    Ok(result)
}

/// Run the pipeline over a batch.
///
/// A batch of N files always yields exactly N results. Files the pipeline
/// cannot process (non-UTF-8 content, oversized content) yield a result
/// with no symbols and a warning, never an error and never a missing
/// entry.
pub fn ingest_files(files: &[SourceFile], options: &IngestOptions) -> Vec<ExtractionResult> {
    files
        .iter()
        .map(|file| {
            if file.data.len() > options.max_file_bytes {
                log::warn!("{}: exceeds size limit, skipped", file.path);
                return skipped_result(file, WarningKind::FileTooLarge, options.max_file_bytes);
            }
            match ingest_file(file, options) {
                Ok(result) => result,
                Err(IngestError::Utf8 { source, .. }) => {
                    log::warn!("{}: content is not valid UTF-8, skipped", file.path);
                    skipped_result(file, WarningKind::InvalidUtf8, source.valid_up_to())
                }
                Err(IngestError::InvalidSpan { path, start, end }) => {
                    // Internal invariant break; degrade rather than drop
                    // the batch entry.
                    log::error!("{path}: invalid span ({start}, {end})");
                    skipped_result(file, WarningKind::UnmatchedBrace, start)
                }
            }
        })
        .collect()
}

fn skipped_result(file: &SourceFile, kind: WarningKind, offset: usize) -> ExtractionResult {
    ExtractionResult {
        path: file.path.clone(),
        language: classify(&file.path, file.declared_extension.as_deref()).tag,
        symbols: Vec::new(),
        warnings: vec![Warning { kind, offset }],
        sha256: sha256_hex(&file.data),
        bytes: file.data.len(),
        line_count: 0,
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
