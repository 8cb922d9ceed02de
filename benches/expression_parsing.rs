//! Benchmarks for expression compilation
//!
//! Run with: cargo bench

use colexpr::expression::{tokenize, Parser};
use colexpr::ExpressionCompiler;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// `sqrt("c0") + sqrt("c1") + ...` with `terms` terms
fn sum_of_roots(terms: usize) -> String {
    (0..terms)
        .map(|i| format!("sqrt(\"c{}\")", i))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// `abs(abs(...abs("x")...))` nested `depth` times
fn nested_calls(depth: usize) -> String {
    let mut expr = "\"x\"".to_string();
    for _ in 0..depth {
        expr = format!("abs({})", expr);
    }
    expr
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for terms in [10, 100, 1000].iter() {
        let expr = sum_of_roots(*terms);
        group.throughput(Throughput::Bytes(expr.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(terms), &expr, |b, expr| {
            b.iter(|| tokenize(black_box(expr)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for terms in [8, 32, 64].iter() {
        let tokens = tokenize(&sum_of_roots(*terms)).unwrap_or_default();
        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(terms), &tokens, |b, tokens| {
            b.iter(|| Parser::new(black_box(tokens)).parse())
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let compiler = ExpressionCompiler::new();
    let mut group = c.benchmark_group("compile");

    for terms in [8, 32, 64].iter() {
        let expr = sum_of_roots(*terms);
        group.bench_with_input(BenchmarkId::new("sum", terms), &expr, |b, expr| {
            b.iter(|| compiler.compile(black_box(expr)))
        });
    }

    for depth in [8, 32, 60].iter() {
        let expr = nested_calls(*depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &expr, |b, expr| {
            b.iter(|| compiler.compile(black_box(expr)))
        });
    }

    group.finish();
}

fn bench_compile_batch(c: &mut Criterion) {
    let compiler = ExpressionCompiler::new();
    let exprs: Vec<String> = (0..100)
        .map(|i| format!("sqrt(\"a\") / abs(\"b{}\") ^ \"a\" + \"a\" * \"b\"", i % 10))
        .collect();

    c.bench_function("compile_batch_100", |b| {
        b.iter(|| compiler.compile_all(black_box(&exprs)))
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_parse,
    bench_compile,
    bench_compile_batch
);
criterion_main!(benches);
