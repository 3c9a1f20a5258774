use criterion::{
    AxisScale, BatchSize, Bencher, BenchmarkId, Criterion, PlotConfiguration, Throughput,
};

use atomtable::{AtomTable, NewAtom, LINK, NODE};

use super::ITEM_COUNTS;

const SAMPLE_SIZE: usize = 10;

fn node_insert(b: &mut Bencher<'_>, len: usize) {
    b.iter_batched(
        || {
            let table = AtomTable::new();
            let concept = table.add_type("ConceptNode", NODE);
            (table, concept)
        },
        |(table, concept)| {
            for i in 0..len {
                table.add(NewAtom::node(concept, format!("n{i}"))).unwrap();
            }
        },
        BatchSize::SmallInput,
    );
}

fn redundant_node_insert(b: &mut Bencher<'_>, len: usize) {
    // Every name collides with one of eight buckets, so this exercises the
    // merge path (L1) rather than the fresh-insert path.
    b.iter_batched(
        || {
            let table = AtomTable::new();
            let concept = table.add_type("ConceptNode", NODE);
            (table, concept)
        },
        |(table, concept)| {
            for i in 0..len {
                table
                    .add(NewAtom::node(concept, format!("n{}", i % 8)))
                    .unwrap();
            }
        },
        BatchSize::SmallInput,
    );
}

fn link_insert(b: &mut Bencher<'_>, len: usize) {
    b.iter_batched(
        || {
            let table = AtomTable::new();
            let concept = table.add_type("ConceptNode", NODE);
            let list = table.add_type("ListLink", LINK);
            let a = table.add(NewAtom::node(concept, "a")).unwrap();
            let b = table.add(NewAtom::node(concept, "b")).unwrap();
            (table, list, a, b)
        },
        |(table, list, a, b)| {
            for _ in 0..len {
                table.add(NewAtom::link(list, [a, b])).unwrap();
            }
        },
        BatchSize::SmallInput,
    );
}

fn bench_fn<F>(c: &mut Criterion, name: &str, benchmark: F)
where
    F: Fn(&mut Bencher<'_>, usize) + 'static,
{
    let mut group = c.benchmark_group(name);
    for item_count in ITEM_COUNTS.iter() {
        group
            .bench_with_input(
                BenchmarkId::from_parameter(item_count),
                item_count,
                |b: &mut Bencher<'_>, len: &usize| benchmark(b, *len),
            )
            .throughput(Throughput::Elements(*item_count as u64))
            .plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic))
            .sample_size(SAMPLE_SIZE);
    }
    group.finish();
}

pub fn bench_insertion(c: &mut Criterion) {
    bench_fn(c, "insertion/node", node_insert);
    bench_fn(c, "insertion/node_redundant", redundant_node_insert);
    bench_fn(c, "insertion/link", link_insert);
}
