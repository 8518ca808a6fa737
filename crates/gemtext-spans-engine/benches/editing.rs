use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use gemtext_spans_engine::editing::{Cmd, Document};
mod common;

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("editing");
    group.sample_size(20);

    let content = common::generate_large_document();
    let doc = Document::from_text(&content);
    let middle = content[..content.len() / 2].rfind('\n').map_or(0, |i| i + 1);

    group.bench_function("insert_line_middle", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut doc| {
                doc.apply(Cmd::InsertText {
                    at: middle,
                    text: "* typed item\n".into(),
                })
                .unwrap();
                std::hint::black_box(doc);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("type_heading_chars", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut doc| {
                for (i, ch) in "## typed heading".char_indices() {
                    doc.apply(Cmd::InsertText {
                        at: middle + i,
                        text: ch.to_string(),
                    })
                    .unwrap();
                }
                std::hint::black_box(doc);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_fence_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("fence_toggle");
    group.sample_size(10);

    let content = common::generate_large_document();
    let doc = Document::from_text(&content);

    // Opening a fence at the top reclassifies everything below it.
    group.bench_function("open_and_close_at_top", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut doc| {
                doc.apply(Cmd::InsertText {
                    at: 0,
                    text: "```\n".into(),
                })
                .unwrap();
                doc.apply(Cmd::DeleteRange { range: 0..4 }).unwrap();
                std::hint::black_box(doc);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_typing, bench_fence_toggle);
criterion_main!(benches);
