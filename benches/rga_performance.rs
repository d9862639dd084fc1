//! Performance benchmarks for the markdown CRDT pipeline.
//!
//! Benchmarks cover the stages a real editing session exercises:
//! - parsing markdown into an RGA tree
//! - diffing a locally-edited buffer into a changeset
//! - applying a changeset
//! - merging two replicas' documents
//! - encoding/decoding through CBOR
//!
//! Run with: cargo bench

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use md_crdt_rga::Document;
use md_crdt_rga::crdt::{Event, EventCmpFn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
struct Seq(u64);

impl Event for Seq {
    fn to_event_string(&self) -> String {
        self.0.to_string()
    }
}

fn cmp() -> EventCmpFn<Seq> {
    Arc::new(|a: &Seq, b: &Seq| a.cmp(b))
}

/// Builds a markdown document of roughly `paragraphs` paragraphs, each
/// followed by a short bullet list, so the tree has meaningful nesting.
fn sample_markdown(paragraphs: usize) -> String {
    let mut out = String::from("# Benchmark Document\n\n");
    for i in 0..paragraphs {
        out.push_str(&format!(
            "This is paragraph number {i} of the benchmark document, with enough text to matter.\n\n"
        ));
        out.push_str("- first item\n- second item\n- third item\n\n");
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_markdown");

    for size in [10, 50, 200].iter() {
        let markdown = sample_markdown(*size);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(BenchmarkId::new("from_markdown", size), &markdown, |b, markdown| {
            b.iter(|| black_box(Document::from_markdown(markdown, Seq(0), cmp())));
        });
    }
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");

    for size in [10, 50, 200].iter() {
        let base_md = sample_markdown(*size);
        let edited_md = format!("{base_md}One more paragraph appended at the end.\n\n");
        let doc = Document::from_markdown(&base_md, Seq(0), cmp());

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("append_one_paragraph", size), &edited_md, |b, edited_md| {
            b.iter(|| black_box(doc.diff(edited_md, Seq(1))));
        });
    }
    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    for size in [10, 50, 200].iter() {
        let base_md = sample_markdown(*size);
        let edited_md = format!("{base_md}One more paragraph appended at the end.\n\n");
        let doc = Document::from_markdown(&base_md, Seq(0), cmp());
        let change_set = doc.diff(&edited_md, Seq(1));

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("apply_append", size), &change_set, |b, change_set| {
            b.iter(|| black_box(doc.apply(change_set)));
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for size in [10, 50, 200].iter() {
        let base_md = sample_markdown(*size);
        let base = Document::from_markdown(&base_md, Seq(0), cmp());

        let a_md = format!("{base_md}Appended by replica A.\n\n");
        let a_changes = base.diff(&a_md, Seq(1));
        let replica_a = base.apply(&a_changes);

        let b_md = base_md.replacen("Benchmark Document", "Benchmark Document (renamed)", 1);
        let b_changes = base.diff(&b_md, Seq(2));
        let replica_b = base.apply(&b_changes);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("two_replica_merge", size), &(replica_a, replica_b), |b, (ra, rb)| {
            b.iter(|| black_box(ra.merge(rb)));
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for size in [10, 50, 200].iter() {
        let markdown = sample_markdown(*size);
        let doc = Document::from_markdown(&markdown, Seq(0), cmp());
        let bytes = doc.encode().unwrap();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &doc, |b, doc| {
            b.iter(|| black_box(doc.encode().unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &bytes, |b, bytes| {
            b.iter(|| black_box(Document::<Seq>::decode(bytes, cmp()).unwrap()));
        });
    }
    group.finish();
}

fn bench_node_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_count");

    for size in [10, 50, 200].iter() {
        let markdown = sample_markdown(*size);
        let doc = Document::from_markdown(&markdown, Seq(0), cmp());

        group.bench_with_input(BenchmarkId::new("total_node_count", size), &doc, |b, doc| {
            b.iter(|| black_box(doc.total_node_count()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_diff,
    bench_apply,
    bench_merge,
    bench_codec,
    bench_node_count
);

criterion_main!(benches);
