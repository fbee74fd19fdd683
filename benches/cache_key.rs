//! Benchmarks for cache key derivation
//!
//! This benchmark measures:
//! - Key derivation for short prompts and long conversations
//! - FIFO cache insert throughput at capacity

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use puter_ai::cache::{CacheKeyGenerator, ResponseCache};
use puter_ai::types::Message;

fn conversation(turns: usize) -> Vec<Message> {
    (0..turns)
        .map(|i| {
            if i % 2 == 0 {
                Message::user(format!("question {i}: what changed in release {i}?"))
            } else {
                Message::assistant(format!("answer {i}: {}", "details ".repeat(20)))
            }
        })
        .collect()
}

fn bench_key_derivation(c: &mut Criterion) {
    let keys = CacheKeyGenerator::new();
    let mut group = c.benchmark_group("cache_key");

    for turns in [1usize, 10, 100] {
        let msgs = conversation(turns);
        group.throughput(Throughput::Elements(turns as u64));
        group.bench_with_input(BenchmarkId::from_parameter(turns), &msgs, |b, msgs| {
            b.iter(|| keys.generate(black_box(msgs), "openai/gpt-4o-mini", 0.7, 1000).unwrap())
        });
    }
    group.finish();
}

fn bench_cache_insert(c: &mut Criterion) {
    let keys = CacheKeyGenerator::new();
    let prepared: Vec<_> = (0..1000)
        .map(|i| {
            keys.generate(&[Message::user(format!("prompt {i}"))], "m", 0.7, 1000)
                .unwrap()
        })
        .collect();

    c.bench_function("fifo_insert_at_capacity", |b| {
        b.iter(|| {
            let mut cache = ResponseCache::new(100);
            for key in &prepared {
                cache.set(key.clone(), String::from("response"));
            }
            black_box(cache.len())
        })
    });
}

criterion_group!(benches, bench_key_derivation, bench_cache_insert);
criterion_main!(benches);
