use std::hint::black_box;
use std::io::Write;

use claude_code_transcripts::grouper::group_conversations;
use claude_code_transcripts::parsers::parse_session_file;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tempfile::NamedTempFile;

/// Generate a synthetic session.jsonl with N prompt / tool call / result / reply rounds
fn generate_session_file(num_rounds: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    for i in 0..num_rounds {
        let ts = format!("2025-01-{:02}T12:{:02}:00Z", (i % 28) + 1, i % 60);
        writeln!(
            file,
            r#"{{"type":"user","timestamp":"{ts}","message":{{"role":"user","content":"Test prompt {i}"}}}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"type":"assistant","timestamp":"{ts}","message":{{"role":"assistant","content":[{{"type":"tool_use","id":"toolu_{i}","name":"Bash","input":{{"command":"ls -la"}}}}]}}}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"type":"user","timestamp":"{ts}","message":{{"role":"user","content":[{{"type":"tool_result","tool_use_id":"toolu_{i}","content":"total 0\ndrwxr-xr-x  2 user user 40 ."}}]}}}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"type":"assistant","timestamp":"{ts}","message":{{"role":"assistant","content":[{{"type":"text","text":"The directory is **empty**."}}]}}}}"#
        )
        .unwrap();
    }

    file.flush().unwrap();
    file
}

fn bench_parse_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_session_file");

    for size in [100, 1_000, 10_000].iter() {
        let file = generate_session_file(*size);

        group.throughput(Throughput::Elements((*size * 4) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| parse_session_file(black_box(file.path())).unwrap());
        });
    }

    group.finish();
}

fn bench_group_conversations(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_conversations");

    for size in [100, 1_000, 10_000].iter() {
        let file = generate_session_file(*size);
        let lines = parse_session_file(file.path()).unwrap().lines;

        group.throughput(Throughput::Elements(lines.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| group_conversations(black_box(lines.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_session, bench_group_conversations);
criterion_main!(benches);
