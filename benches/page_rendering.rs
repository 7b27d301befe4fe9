use std::hint::black_box;
use std::path::Path;

use claude_code_transcripts::parsers::parse_session_str;
use claude_code_transcripts::render::render_markdown;
use claude_code_transcripts::{PageBudget, TranscriptConfig, build_site};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn synthetic_session(num_prompts: usize) -> String {
    let mut out = String::new();
    for i in 0..num_prompts {
        out.push_str(&format!(
            r#"{{"type":"user","message":{{"role":"user","content":"Prompt {i} with <html> & `code`"}}}}"#
        ));
        out.push('\n');
        out.push_str(&format!(
            r#"{{"type":"assistant","message":{{"role":"assistant","content":[{{"type":"tool_use","id":"t{i}","name":"Edit","input":{{"file_path":"/src/lib.rs","old_string":"a","new_string":"b"}}}}]}}}}"#
        ));
        out.push('\n');
        out.push_str(&format!(
            r#"{{"type":"user","message":{{"role":"user","content":[{{"type":"tool_result","tool_use_id":"t{i}","content":"[main {:07x}] Change {i}"}}]}}}}"#,
            0xabc0000 + i
        ));
        out.push('\n');
        out.push_str(
            r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"Done.\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n```rust\nfn main() {}\n```"}]}}"#,
        );
        out.push('\n');
    }
    out
}

fn bench_build_site(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_site");
    let config = TranscriptConfig::default().with_budget(PageBudget::new(5, Some(500_000)));

    for size in [10, 100, 1_000].iter() {
        let input = synthetic_session(*size);
        let parsed = parse_session_str(&input, Path::new("bench.jsonl")).unwrap();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| build_site(black_box(parsed.clone()), &config));
        });
    }

    group.finish();
}

fn bench_render_markdown(c: &mut Criterion) {
    let text =
        "# Heading\n\nSome **bold** and _italic_ text with `code`.\n\n- item\n- item\n\n".repeat(50);
    c.bench_function("render_markdown", |b| b.iter(|| render_markdown(black_box(&text))));
}

criterion_group!(benches, bench_build_site, bench_render_markdown);
criterion_main!(benches);
