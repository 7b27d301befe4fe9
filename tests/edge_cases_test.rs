/// Edge case tests for unusual but valid session files
mod common;

use std::fs;

use claude_code_transcripts::{GenerateError, ParseError, TranscriptConfig, generate_html};
use common::{RecordBuilder, SessionFileBuilder, read};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_edge_case_empty_file_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let session = temp_dir.path().join("empty.jsonl");
    fs::write(&session, "").unwrap();
    let out = temp_dir.path().join("out");

    let err = generate_html(&session, &out, &TranscriptConfig::default()).unwrap_err();
    assert!(matches!(err, GenerateError::Parse(ParseError::NoRecords { .. })));
    assert!(err.to_string().contains("empty.jsonl"));
    assert!(!out.exists(), "no output directory for a failed conversion");
}

#[test]
fn test_edge_case_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = generate_html(
        &temp_dir.path().join("missing.jsonl"),
        &temp_dir.path().join("out"),
        &TranscriptConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::Parse(ParseError::Io { .. })));
}

#[test]
fn test_edge_case_only_assistant_messages() {
    let session = SessionFileBuilder::new()
        .record(RecordBuilder::assistant("Resuming where we left off"))
        .record(RecordBuilder::assistant("Done"));
    let (temp_dir, path) = session.build();
    let out = temp_dir.path().join("out");

    let report = generate_html(&path, &out, &TranscriptConfig::default()).unwrap();
    assert_eq!(report.conversations, 1);
    assert_eq!(report.prompts, 0);
    assert_eq!(report.pages, 1);

    let index = read(out.join("index.html"));
    assert!(index.contains("0 prompts"));
    assert!(read(out.join("page-001.html")).contains("Resuming where we left off"));
}

#[test]
fn test_edge_case_meta_records_do_not_open_conversations() {
    let session = SessionFileBuilder::new()
        .record(RecordBuilder::user("<local-command-caveat>Caveat</local-command-caveat>").meta())
        .record(RecordBuilder::user("Real prompt"))
        .record(RecordBuilder::assistant("Reply"));
    let (temp_dir, path) = session.build();
    let out = temp_dir.path().join("out");

    let report = generate_html(&path, &out, &TranscriptConfig::default()).unwrap();
    // Leading meta record plus one prompt
    assert_eq!(report.conversations, 2);
    assert_eq!(report.prompts, 1);
    assert!(read(out.join("index.html")).contains("1 prompts"));
}

#[test]
fn test_edge_case_continuation_is_collapsed_and_not_indexed() {
    let session = SessionFileBuilder::new()
        .record(RecordBuilder::user("Original task"))
        .record(RecordBuilder::assistant("Working"))
        .record(
            RecordBuilder::user("This session is being continued from a previous conversation")
                .compact_summary(),
        )
        .record(RecordBuilder::assistant("Continuing"));
    let (temp_dir, path) = session.build();
    let out = temp_dir.path().join("out");

    generate_html(&path, &out, &TranscriptConfig::default()).unwrap();

    let page = read(out.join("page-001.html"));
    assert!(page.contains(r#"<details class="continuation">"#));
    let index = read(out.join("index.html"));
    assert!(index.contains("1 prompts"));
    assert!(!index.contains("This session is being continued"));
}

#[test]
fn test_edge_case_unicode_and_emoji() {
    let session = SessionFileBuilder::new()
        .record(RecordBuilder::user("Explique ce code 日本語 🚀"))
        .record(RecordBuilder::assistant("Voilà ✓"));
    let (temp_dir, path) = session.build();
    let out = temp_dir.path().join("out");

    generate_html(&path, &out, &TranscriptConfig::default()).unwrap();
    let page = read(out.join("page-001.html"));
    assert!(page.contains("日本語 🚀"));
    assert!(page.contains("Voilà ✓"));
}

#[test]
fn test_edge_case_unknown_block_type_preserved() {
    let session = SessionFileBuilder::new()
        .record(RecordBuilder::user("search please"))
        .raw_line(
            &json!({
                "type": "assistant",
                "message": {"role": "assistant", "content": [
                    {"type": "server_tool_use", "id": "srv_1", "name": "web_search"}
                ]}
            })
            .to_string(),
        );
    let (temp_dir, path) = session.build();
    let out = temp_dir.path().join("out");

    let report = generate_html(&path, &out, &TranscriptConfig::default()).unwrap();
    assert_eq!(report.warnings, 0);
    let page = read(out.join("page-001.html"));
    assert!(page.contains("server_tool_use"));
    assert!(page.contains("web_search"));
}

#[test]
fn test_edge_case_huge_tool_output_truncated() {
    let output = "x".repeat(100) + &"\nline".repeat(5_000);
    let session = SessionFileBuilder::new()
        .record(RecordBuilder::user("dump it"))
        .record(RecordBuilder::tool_use("toolu_1", "Bash", json!({"command": "cat big.log"})))
        .record(RecordBuilder::tool_result("toolu_1", &output));
    let (temp_dir, path) = session.build();
    let out = temp_dir.path().join("out");

    generate_html(&path, &out, &TranscriptConfig::default()).unwrap();
    let page = read(out.join("page-001.html"));
    assert!(page.contains("output truncated"));
    assert!(page.len() < output.len());
}

#[test]
fn test_edge_case_output_directory_is_reused() {
    let session = SessionFileBuilder::new().record(RecordBuilder::user("hello"));
    let (temp_dir, path) = session.build();
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("index.html"), "stale").unwrap();

    generate_html(&path, &out, &TranscriptConfig::default()).unwrap();
    assert_ne!(read(out.join("index.html")), "stale");
}

#[test]
fn test_edge_case_records_without_timestamps() {
    let session = SessionFileBuilder::new()
        .record(RecordBuilder::user("no time"))
        .record(RecordBuilder::assistant("still fine"));
    let (temp_dir, path) = session.build();
    let out = temp_dir.path().join("out");

    generate_html(&path, &out, &TranscriptConfig::default()).unwrap();
    let index = read(out.join("index.html"));
    assert!(index.contains("no time"));
    assert!(!index.contains("<time"));
}
