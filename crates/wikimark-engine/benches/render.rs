use criterion::{Criterion, criterion_group, criterion_main};
use pulldown_cmark::{Parser, html};
use wikimark_engine::{
    Document, HostInterlinker, MemoryStore, Principal, RenderContext, RenderOptions, WikiFeatures,
    markdown_to_html, render,
};
mod common;

fn bench_markdown_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    group.bench_function("pulldown_cmark", |b| {
        b.iter(|| {
            let mut out = String::new();
            html::push_html(&mut out, Parser::new(std::hint::black_box(&content)));
            std::hint::black_box(out);
        });
    });

    let options = RenderOptions::default();
    group.bench_function("markdown_to_html", |b| {
        b.iter(|| std::hint::black_box(markdown_to_html(std::hint::black_box(&content), &options)));
    });

    group.finish();
}

fn bench_wiki_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(10);

    let document = Document::new("Bench", common::generate_wiki_content(100));
    let interlinker = HostInterlinker::new("http", "example.org");
    let ctx = RenderContext::new(Principal::guest())
        .with_wiki(WikiFeatures::new("/wiki/").with_interlinker(interlinker));
    group.bench_function("links", |b| {
        b.iter(|| std::hint::black_box(render(std::hint::black_box(&document), &ctx)));
    });

    let mut store = MemoryStore::new();
    for i in 0..20 {
        store.put(
            "bench",
            Document::new(format!("Part {i}"), common::generate_wiki_content(5)),
        );
    }
    let parts: String = (0..20).map(|i| format!("{{{{Part {i}}}}}\n\n")).collect();
    let page = Document::new("Index", parts).with_bag("bench");
    let ctx = RenderContext::new(Principal::guest())
        .with_store(&store)
        .with_wiki(WikiFeatures::new("/wiki/"));
    group.bench_function("transclusion", |b| {
        b.iter(|| std::hint::black_box(render(std::hint::black_box(&page), &ctx)));
    });

    group.finish();
}

criterion_group!(benches, bench_markdown_baseline, bench_wiki_render);
criterion_main!(benches);
