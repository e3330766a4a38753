// Copyright 2024-2025 Irreducible Inc.

use std::iter::repeat_with;

use criterion::{
	criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion, Throughput,
};
use preon_field::{
	util::batch_inverse_and_mul, BinaryField192b, BinaryField256b, BinaryField320b,
	BinaryField64b, Field,
};
use rand::thread_rng;

const BATCH_SIZE: usize = 1 << 10;

fn bench_field<F: Field>(group: &mut BenchmarkGroup<WallTime>, name: &str) {
	let mut rng = thread_rng();
	let lhs = repeat_with(|| F::random(&mut rng))
		.take(BATCH_SIZE)
		.collect::<Vec<_>>();
	let rhs = repeat_with(|| F::random(&mut rng))
		.take(BATCH_SIZE)
		.collect::<Vec<_>>();

	group.bench_function(format!("{name}/mul"), |b| {
		b.iter(|| {
			lhs.iter()
				.zip(&rhs)
				.map(|(&x, &y)| x * y)
				.sum::<F>()
		})
	});
	group.bench_function(format!("{name}/square"), |b| {
		b.iter(|| lhs.iter().map(|a| a.square()).sum::<F>())
	});
	group.bench_function(format!("{name}/invert"), |b| {
		b.iter(|| lhs.iter().filter_map(|a| a.invert()).sum::<F>())
	});
	group.bench_function(format!("{name}/batch_inverse"), |b| {
		b.iter(|| batch_inverse_and_mul(&lhs, F::ONE))
	});
}

fn bench_binary_fields(c: &mut Criterion) {
	let mut group = c.benchmark_group("binary_field");
	group.throughput(Throughput::Elements(BATCH_SIZE as u64));
	bench_field::<BinaryField64b>(&mut group, "64b");
	bench_field::<BinaryField192b>(&mut group, "192b");
	bench_field::<BinaryField256b>(&mut group, "256b");
	bench_field::<BinaryField320b>(&mut group, "320b");
	group.finish()
}

criterion_group!(binary_field, bench_binary_fields);
criterion_main!(binary_field);
