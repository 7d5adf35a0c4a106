//! Benchmarks for delimiter position lookups

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dissect_core::{Delimiter, DelimiterChain};
use std::hint::black_box;

/// Generate a log line with `fields` space separated fields and a trailing message
fn generate_line(fields: usize) -> String {
    let words = ["alpha", "beta", "gamma", "delta", "epsilon"];
    let mut line = words
        .iter()
        .cycle()
        .take(fields)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    line.push_str(" || tail of the message");
    line
}

fn benchmark_substring_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("substring_search");
    let delimiter = Delimiter::from_literal(" || ");

    for fields in [4, 32, 256].iter() {
        let line = generate_line(*fields);
        group.bench_with_input(BenchmarkId::from_parameter(fields), &line, |b, line| {
            b.iter(|| delimiter.position_of(black_box(line), 0));
        });
    }

    group.finish();
}

fn benchmark_chain_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_walk");

    for fields in [4, 16, 64].iter() {
        let line = generate_line(*fields);
        let chain = DelimiterChain::from_literals(
            std::iter::once("").chain(std::iter::repeat(" ").take(*fields - 1)),
        );

        group.bench_with_input(BenchmarkId::from_parameter(fields), &line, |b, line| {
            b.iter(|| {
                let mut offset = 0;
                for (_, delimiter) in &chain {
                    match delimiter.position_of(black_box(line), offset) {
                        Ok(Some(at)) => offset = at + delimiter.width(),
                        _ => break,
                    }
                }
                offset
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_substring_search, benchmark_chain_walk);
criterion_main!(benches);
