use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jobboard::{AttributeMap, Param, PartialUpdate, Predicate, assemble};

static COLUMNS: AttributeMap = AttributeMap::new(&[("companyHandle", "company_handle")]);

/// A partial update touching `n` fields.
fn build_update(n: usize) -> PartialUpdate {
    let mut update = PartialUpdate::new();
    for i in 0..n {
        update = update.set(format!("field{i}"), i as i64);
    }
    update
}

fn bench_compile_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_compiler/compile_update");

    for n in [1, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let fragment = build_update(n).compile(&COLUMNS).unwrap();
                black_box(fragment.to_sql());
            });
        });
    }

    group.finish();
}

fn bench_predicate_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_compiler/predicate_build");

    group.bench_function("three_dimensions", |b| {
        b.iter(|| {
            let fragment = Predicate::new()
                .contains("title", "engineer")
                .gte("salary", 40_000i32)
                .nonzero("equity")
                .build()
                .unwrap();
            black_box(fragment.to_sql());
        });
    });

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_compiler/assemble");

    for n in [1, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let set = build_update(n).compile(&COLUMNS).unwrap();
                let query = assemble(
                    "UPDATE jobs SET {} WHERE id = ? RETURNING id",
                    Some(set),
                    [Param::new(1i32)],
                )
                .unwrap();
                black_box(query.to_sql());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compile_update,
    bench_predicate_build,
    bench_assemble
);
criterion_main!(benches);
