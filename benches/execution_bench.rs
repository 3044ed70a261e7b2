use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use treelisp::{Evaluator, Value};

fn sum_benchmark(c: &mut Criterion) {
    let program = Value::from_json(json!(["+", 1, 2, 3, 4, 5, 6, 7, 8, 9, 10])).unwrap();
    let evaluator = Evaluator::new();

    c.bench_function("evaluate flat sum", |b| {
        b.iter(|| evaluator.evaluate(black_box(&program)).unwrap())
    });
}

fn closure_benchmark(c: &mut Criterion) {
    // Sums a 50-element list by recursion through a global closure
    let items: Vec<i64> = (1..=50).collect();
    let program: Vec<Value> = [
        json!(["set", "sum-list", ["lambda", ["l"],
            ["if", "l", ["+", ["car", "l"], ["sum-list", ["cdr", "l"]]], 0]]]),
        json!(["sum-list", ["quote", items]]),
    ]
    .into_iter()
    .map(|form| Value::from_json(form).unwrap())
    .collect();

    c.bench_function("recursive closure over list", |b| {
        b.iter(|| {
            let evaluator = Evaluator::new();
            evaluator.execute(black_box(&program)).unwrap()
        })
    });
}

fn json_conversion_benchmark(c: &mut Criterion) {
    let source = r#"[["lambda", ["x", "y"], ["cons", "x", ["+", "y", 1]]], 1, 2]"#;

    c.bench_function("parse json program", |b| {
        b.iter(|| Value::parse_json(black_box(source)).unwrap())
    });
}

criterion_group!(
    benches,
    sum_benchmark,
    closure_benchmark,
    json_conversion_benchmark
);
criterion_main!(benches);
