//! Throughput benchmarks for the event frame decoder.
//!
//! Feeds the same stream in different chunk sizes, including sizes that
//! split lines and multi-byte characters.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use encyclo::dispatch::{StreamCallbacks, StreamDispatcher};
use encyclo::sse::FrameDecoder;

/// A stream shaped like one generate/critique round.
fn generate_stream(tokens: usize) -> Vec<u8> {
    let mut out = String::new();
    for i in 0..tokens {
        let token = serde_json::to_string(&format!("word{i} café – naïve ")).unwrap_or_default();
        out.push_str("event: article_token\ndata: ");
        out.push_str(&token);
        out.push_str("\n\n");
        if i % 50 == 0 {
            out.push_str("event: evaluation_token\ndata: \"ok \"\n\n");
        }
    }
    out.push_str("event: round_complete\ndata: {\"number\":1,\"evaluation\":{\"overall\":8.0}}\n\n");
    out.push_str("event: done\ndata: \"{\\\"topic\\\":\\\"bench\\\"}\"\n\n");
    out.into_bytes()
}

fn bench_decode_chunked(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_chunked");
    let stream = generate_stream(2_000);
    group.throughput(Throughput::Bytes(stream.len() as u64));

    for chunk in [1usize, 7, 64, 4096] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{chunk}_bytes")),
            &stream,
            |b, stream| {
                b.iter(|| {
                    let mut decoder = FrameDecoder::new();
                    let mut frames = 0;
                    for piece in stream.chunks(chunk) {
                        frames += decoder.feed(black_box(piece)).len();
                    }
                    black_box(frames)
                });
            },
        );
    }
    group.finish();
}

fn bench_decode_and_dispatch(c: &mut Criterion) {
    let stream = generate_stream(2_000);
    let mut group = c.benchmark_group("decode_and_dispatch");
    group.throughput(Throughput::Bytes(stream.len() as u64));

    group.bench_function("64_bytes", |b| {
        b.iter(|| {
            let mut article = String::new();
            {
                let callbacks = StreamCallbacks::new().on_token(
                    encyclo::dispatch::Channel::Article,
                    |token| article.push_str(&token),
                );
                let mut dispatcher = StreamDispatcher::new(callbacks);
                let mut decoder = FrameDecoder::new();
                for piece in stream.chunks(64) {
                    for frame in decoder.feed(piece) {
                        let _ = dispatcher.dispatch(&frame);
                    }
                }
            }
            black_box(article.len())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_decode_chunked, bench_decode_and_dispatch);
criterion_main!(benches);
