//! Batch pipeline tests.
//!
//! The contract with the driver: N files in, N results out, every per-file
//! problem captured as data on the result. Files are independent, so the
//! batch can also be fanned out across threads by the caller.

use ingestor_core::ingest::classify::LanguageTag;
use ingestor_core::ingest::{ingest_file, ingest_files, IngestOptions, SourceFile};
use ingestor_core::symbol::WarningKind;

#[test]
fn test_batch_yields_one_result_per_file() {
    let options = IngestOptions::default();
    let files = vec![
        SourceFile::new("a.c", "int a(void) { return 0; }\n"),
        SourceFile::new("b.cpp", "namespace b { void f(); }\n"),
        SourceFile::new("c.h", "extern \"C\" { int g(void); }\n"),
        SourceFile::new("notes.txt", "not code at all\n"),
    ];
    let results = ingest_files(&files, &options);
    assert_eq!(results.len(), files.len());
    for (file, result) in files.iter().zip(&results) {
        assert_eq!(file.path, result.path);
    }
    assert_eq!(results[0].language, LanguageTag::C);
    assert_eq!(results[1].language, LanguageTag::Cpp);
    assert_eq!(results[2].language, LanguageTag::C);
    assert_eq!(results[3].language, LanguageTag::Unknown);
}

#[test]
fn test_malformed_file_does_not_abort_the_batch() {
    let options = IngestOptions::default();
    let files = vec![
        SourceFile::new("good.c", "int f(void);\n"),
        SourceFile::new("truncated.c", "int broken(void) {\n"),
        SourceFile::new("also_good.c", "int g(void);\n"),
    ];
    let results = ingest_files(&files, &options);
    assert_eq!(results.len(), 3);
    assert!(results[0].warnings.is_empty());
    assert_eq!(results[1].warnings.len(), 1);
    assert_eq!(results[1].warnings[0].kind, WarningKind::UnmatchedBrace);
    // Partial results, not an empty result.
    assert_eq!(results[1].symbols.len(), 1);
    assert!(results[2].warnings.is_empty());
}

#[test]
fn test_non_utf8_degrades_to_warning() {
    let options = IngestOptions::default();
    let files = vec![SourceFile {
        path: "binaryish.c".to_string(),
        data: vec![0x69, 0x6e, 0x74, 0x20, 0xC0, 0xAF],
        declared_extension: None,
    }];
    let results = ingest_files(&files, &options);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].warnings[0].kind, WarningKind::InvalidUtf8);
    assert_eq!(results[0].warnings[0].offset, 4);
    assert!(results[0].symbols.is_empty());
}

#[test]
fn test_oversized_file_degrades_to_warning() {
    let options = IngestOptions {
        max_file_bytes: 16,
        ..IngestOptions::default()
    };
    let files = vec![SourceFile::new(
        "huge.c",
        "int a; int b; int c; int d;\n",
    )];
    let results = ingest_files(&files, &options);
    assert_eq!(results[0].warnings[0].kind, WarningKind::FileTooLarge);
    assert!(results[0].symbols.is_empty());
}

#[test]
fn test_unknown_files_still_get_best_effort_extraction() {
    let file = SourceFile::new("script.weird", "int helper(int x) { return x; }\n");
    let result = ingest_file(&file, &IngestOptions::default()).unwrap();
    assert_eq!(result.language, LanguageTag::Unknown);
    assert_eq!(result.symbols.len(), 1);
    assert_eq!(result.symbols[0].name, "helper");
}

#[test]
fn test_result_metadata() {
    let source = "int f(void);\nint g(void);\n";
    let file = SourceFile::new("meta.c", source);
    let result = ingest_file(&file, &IngestOptions::default()).unwrap();
    assert_eq!(result.bytes, source.len());
    assert_eq!(result.line_count, 2);
    assert_eq!(result.sha256.len(), 64);
    assert!(result.sha256.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_same_content_same_fingerprint() {
    let options = IngestOptions::default();
    let a = ingest_file(&SourceFile::new("a.c", "int x;\n"), &options).unwrap();
    let b = ingest_file(&SourceFile::new("b.c", "int x;\n"), &options).unwrap();
    assert_eq!(a.sha256, b.sha256);
}

#[test]
fn test_json_export_shape() {
    let file = SourceFile::new("api.h", "extern \"C\" { int g(void); }\n");
    let result = ingest_file(&file, &IngestOptions::default()).unwrap();
    let json = result.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["path"], "api.h");
    assert_eq!(value["language"], "c");
    assert_eq!(value["symbols"][0]["name"], "g");
    assert_eq!(value["symbols"][0]["kind"], "function");
    assert_eq!(value["symbols"][0]["visibility"], "extern");
    assert!(value["symbols"][0]["span"]["start"].is_u64());
}

#[test]
fn test_files_are_independent() {
    // A malformed file must leave no state behind that changes how the
    // next file parses: same input, same output, whatever came before.
    let options = IngestOptions::default();
    let clean = SourceFile::new("clean.c", "int f(void) { return 0; }\n");
    let alone = ingest_file(&clean, &options).unwrap();
    let batch = ingest_files(
        &[
            SourceFile::new("broken.c", "int b( {\n\"unterminated\n"),
            clean.clone(),
        ],
        &options,
    );
    assert_eq!(alone.symbols.len(), batch[1].symbols.len());
    assert_eq!(alone.warnings.len(), batch[1].warnings.len());
    assert_eq!(alone.sha256, batch[1].sha256);
}
