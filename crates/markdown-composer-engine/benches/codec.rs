use criterion::{Criterion, criterion_group, criterion_main};
use markdown_composer_engine::editing::{Selection, toggle_block, toggle_mark};
use markdown_composer_engine::{BlockKind, Mark, parse_markdown, serialize_to_markdown};
use pulldown_cmark::Parser;
mod common;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    group.bench_function("parse_markdown", |b| {
        b.iter(|| parse_markdown(std::hint::black_box(&content)));
    });
    group.bench_function("pulldown_cmark_baseline", |b| {
        b.iter(|| {
            let events: Vec<_> = Parser::new(std::hint::black_box(&content)).collect();
            std::hint::black_box(events);
        });
    });

    let doc = parse_markdown(&content);
    group.bench_function("serialize_to_markdown", |b| {
        b.iter(|| serialize_to_markdown(std::hint::black_box(&doc)));
    });

    let pathological = common::generate_pathological_inline(200);
    group.bench_function("parse_unmatched_openers", |b| {
        b.iter(|| parse_markdown(std::hint::black_box(&pathological)));
    });

    group.finish();
}

fn bench_toggles(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.sample_size(10);

    let doc = parse_markdown(&common::generate_markdown_content(20));
    let all = Selection::all(&doc);
    group.bench_function("toggle_mark_whole_document", |b| {
        b.iter(|| toggle_mark(std::hint::black_box(&doc), &all, Mark::Bold));
    });
    group.bench_function("toggle_block_whole_document", |b| {
        b.iter(|| toggle_block(std::hint::black_box(&doc), &all, BlockKind::BulletedList));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_toggles);
criterion_main!(benches);
