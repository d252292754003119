use atomspace::{serialize_store, AtomSpace};
use atomspace_sexpr::{load_str, SexprParser};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn generate_source(expressions: usize) -> String {
    let mut source = String::new();
    for i in 0..expressions {
        source.push_str(&format!(
            "(EvaluationLink (PredicateNode \"rel-{}\") (ListLink (ConceptNode \"вверху {}\") (ConceptNode \"q\\\"{}\")))\n",
            i % 17,
            i,
            i % 101
        ));
    }
    source
}

fn benchmark_parse_only(c: &mut Criterion) {
    let source = generate_source(1_000);
    let space = AtomSpace::new();

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("parse_1000_expressions", |b| {
        b.iter(|| {
            let parser = SexprParser::new(black_box(&source), space.types());
            parser.count()
        })
    });
    group.finish();
}

fn benchmark_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for size in [100, 1_000, 10_000] {
        let source = generate_source(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| {
                let space = AtomSpace::new();
                load_str(black_box(source), &space).map(|report| report.atoms_after)
            })
        });
    }
    group.finish();
}

fn benchmark_dump(c: &mut Criterion) {
    let space = AtomSpace::new();
    if let Err(error) = load_str(&generate_source(10_000), &space) {
        panic!("failed to build benchmark store: {error}");
    }

    c.bench_function("serialize_store_10000", |b| {
        b.iter(|| serialize_store(black_box(&space)))
    });
}

criterion_group!(benches, benchmark_parse_only, benchmark_load, benchmark_dump);
criterion_main!(benches);
