use std::hint::black_box;

use bstviz::Tree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::{for_each_variant, Lfsr};

#[derive(Debug)]
struct BenchName {
    variant: &'static str,
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(
            format!("{}/{}/n_values", v.variant, v.bench_name),
            v.n_values,
        )
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("walk");

    for n_values in [1, 100, 1_000, 10_000] {
        for_each_variant!(&mut g, bench_param, n_values);
    }
}

fn bench_param<T, M>(variant: &'static str, g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    T: Tree<i64> + Default,
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = T::default();

    for _i in 0..n_values {
        t.insert(rand.next_key());
    }

    bench_iter(variant, n_values, g, &t);
    bench_layout(variant, n_values, g, &t);
}

fn bench_iter<T, M>(variant: &'static str, n_values: usize, g: &mut BenchmarkGroup<M>, t: &T)
where
    T: Tree<i64>,
    M: Measurement,
{
    let bench_name = BenchName {
        variant,
        n_values,
        bench_name: "iter",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t.iter() {
                black_box(v);
            }
        })
    });
}

fn bench_layout<T, M>(variant: &'static str, n_values: usize, g: &mut BenchmarkGroup<M>, t: &T)
where
    T: Tree<i64>,
    M: Measurement,
{
    let bench_name = BenchName {
        variant,
        n_values,
        bench_name: "layout",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Nodes described per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| black_box(t.layout()))
    });
}
