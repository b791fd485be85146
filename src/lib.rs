//! ingestor-core: structural extraction for mixed-language codebases.
//!
//! Given a file's path and content, this library classifies its language,
//! tokenizes it, and extracts a uniform symbol model (functions, types,
//! macros, documentation comments) with byte-accurate spans for downstream
//! indexing. Extraction is lexical and best effort: a brace-depth state
//! machine, not a compiler front end. Malformed input degrades to warnings
//! on the per-file result, never to a lost file.
//!
//! Directory walking, encoding detection, and index storage are the
//! caller's concern; this core performs no I/O.

#![warn(missing_docs)]

pub mod error;
pub mod extract;
pub mod ingest;
pub mod lex;
pub mod symbol;

/// Re-export common error types for convenience.
pub use error::{IngestError, Result};

/// Re-export the pipeline entry points for convenience.
pub use ingest::{ingest_file, ingest_files, IngestOptions, SourceFile};

/// Re-export the result model for convenience.
pub use symbol::{ExtractionResult, Symbol, SymbolKind, Warning, WarningKind};

/// Re-export the language tag for convenience.
pub use ingest::classify::LanguageTag;

/// Ingestor version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
