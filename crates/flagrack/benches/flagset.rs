use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flagrack::prelude::*;

fn flag_names(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("flag{index:02}")).collect()
}

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    for count in [8_usize, 16, 32] {
        let names = flag_names(count);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("register", count), &refs, |b, input| {
            b.iter(|| {
                let mut flags = FlagSet::new();
                flags.register(input.clone()).unwrap();
                flags
            });
        });
    }

    group.finish();
}

fn bench_selectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("selectors");

    for count in [8_usize, 16, 32] {
        let names = flag_names(count);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let flags = FlagSet::with_names(refs.clone()).unwrap();
        let full = flags.mask_of(refs.clone()).unwrap();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("mask_of", count), &refs, |b, input| {
            b.iter(|| flags.mask_of(input.clone()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("has_all_names", count), &refs, |b, input| {
            b.iter(|| flags.has_all(input.clone()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("has_all_mask", count), &full, |b, input| {
            b.iter(|| flags.has_all(*input).unwrap());
        });
    }

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    let names = flag_names(32);
    let mut flags = FlagSet::with_names(names.clone()).unwrap();
    let every_other: Vec<&str> = names.iter().step_by(2).map(String::as_str).collect();
    flags.set(every_other).unwrap();

    group.bench_function("to_json", |b| {
        b.iter(|| serde_json::to_string(&flags).unwrap());
    });

    let document = serde_json::to_string(&flags).unwrap();
    group.bench_function("from_json", |b| {
        b.iter(|| serde_json::from_str::<FlagSet>(&document).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_registration,
    bench_selectors,
    bench_serialization
);
criterion_main!(benches);
