use criterion::*;
use structbase::{Value, struct_type};

fn record_benchmark(c: &mut Criterion) {
    let point = struct_type!(Point { x, y });
    let a = point
        .construct(&[Value::from(1), Value::from("a")], &[])
        .unwrap();
    let b = point
        .construct(&[Value::from(2), Value::from(5)], &[])
        .unwrap();

    c.bench_function("construct positional", |bench| {
        bench.iter(|| {
            point
                .construct(&[Value::from(1), Value::from("a")], &[])
                .unwrap()
        })
    });

    c.bench_function("construct keyword", |bench| {
        bench.iter(|| {
            point
                .construct(&[], &[("x", Value::from(1)), ("y", Value::from("a"))])
                .unwrap()
        })
    });

    c.bench_function("compare", |bench| {
        bench.iter(|| black_box(&a).partial_cmp(black_box(&b)))
    });

    c.bench_function("hash", |bench| {
        bench.iter(|| black_box(&b).try_hash_value().unwrap())
    });

    c.bench_function("repr", |bench| bench.iter(|| black_box(&a).to_string()));
}

criterion_group!(benches, record_benchmark);
criterion_main!(benches);
