use bstviz::Tree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::{for_each_variant, Lfsr};

#[derive(Debug, Clone, Copy)]
struct BenchName {
    variant: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.variant), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [1, 100, 1_000, 10_000] {
        for_each_variant!(&mut g, bench_param, n_values);
    }
}

/// Measure the time needed to insert `n_values` number of randomly generated
/// keys into an empty tree.
fn bench_param<T, M>(variant: &'static str, g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    T: Tree<i64> + Default,
    M: Measurement,
{
    let bench_name = BenchName { variant, n_values };
    g.throughput(Throughput::Elements(n_values as _)); // Keys inserted per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || (T::default(), Lfsr::default()),
            |(mut t, mut rand)| {
                for _i in 0..n_values {
                    t.insert(rand.next_key());
                }
                t
            },
            criterion::BatchSize::PerIteration,
        );
    });
}
