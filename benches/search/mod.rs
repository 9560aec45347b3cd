use bstviz::Tree;
use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};

use crate::{for_each_variant, Lfsr};

#[derive(Debug, Clone, Copy)]
struct BenchName {
    variant: &'static str,
    bench: &'static str,
    n_values: usize,
    n_lookups: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(
            format!("{}/{}_values_{}_n_lookups", v.variant, v.n_values, v.bench),
            v.n_lookups,
        )
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("search_path");

    // Tree size
    for n_values in [1_000, 10_000] {
        // Number of lookups
        for n_lookups in [100, 1_000] {
            for_each_variant!(&mut g, bench_param, n_values, n_lookups);
        }
    }
}

/// For a tree containing `n_values`, perform two benchmarks that each
/// materialise `n_lookups` search paths, one run causing all hits, one run
/// causing all misses.
fn bench_param<T, M>(
    variant: &'static str,
    g: &mut BenchmarkGroup<'_, M>,
    n_values: usize,
    n_lookups: usize,
) where
    T: Tree<i64> + Default,
    M: Measurement,
{
    // The tree must be at least as big as the number of lookups.
    assert!(n_values >= n_lookups);

    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = T::default();

    for _i in 0..n_values {
        t.insert(rand.next_key());
    }

    // Perform a benchmark that continues using the LFSR to generate n_lookups
    // of keys that were never inserted and so will all miss.
    let bench_name = BenchName {
        variant,
        bench: "misses",
        n_values,
        n_lookups,
    };

    g.throughput(Throughput::Elements(n_lookups as _)); // Lookups per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            // Provide the LFSR state after inserting n_values.
            || rand.clone(),
            |mut rand| {
                let mut any_hit = false;
                for _ in 0..n_lookups {
                    any_hit |= t.search_path(&rand.next_key()).is_found();
                }
                assert!(!any_hit)
            },
            BatchSize::SmallInput,
        )
    });

    let bench_name = BenchName {
        variant,
        bench: "hits",
        n_values,
        n_lookups,
    };

    // Perform a benchmark that re-visits the inserted keys.
    g.throughput(Throughput::Elements(n_lookups as _)); // Lookups per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            // Reset the LFSR.
            //
            // It will now generate the same sequence of keys as what was
            // inserted into the tree originally.
            Lfsr::default,
            |mut rand| {
                let mut all_hit = true;
                for _ in 0..n_lookups {
                    all_hit &= t.search_path(&rand.next_key()).is_found();
                }
                assert!(all_hit);
            },
            BatchSize::SmallInput,
        )
    });
}
