use criterion::{
    AxisScale, BatchSize, Bencher, BenchmarkId, Criterion, PlotConfiguration, Throughput,
};

use atomtable::{AtomTable, NewAtom, LINK, NODE};

use super::ITEM_COUNTS;

const SAMPLE_SIZE: usize = 10;

fn leaf_removal(b: &mut Bencher<'_>, len: usize) {
    // Every node here has an empty incoming set, so the non-recursive path
    // is the one actually exercised, not the transitive-closure walk.
    b.iter_batched(
        || {
            let table = AtomTable::new();
            let concept = table.add_type("ConceptNode", NODE);
            let handles: Vec<_> = (0..len)
                .map(|i| table.add(NewAtom::node(concept, format!("n{i}"))).unwrap())
                .collect();
            (table, handles)
        },
        |(table, handles)| {
            for h in handles {
                table.remove(h, false);
            }
        },
        BatchSize::SmallInput,
    );
}

fn recursive_chain_removal(b: &mut Bencher<'_>, len: usize) {
    // A chain of binary links, each pointing at the previous one, so removing
    // the root recursively pulls in the whole chain (exercises
    // `collect_removal_closure`'s recursion rather than a single-level case).
    b.iter_batched(
        || {
            let table = AtomTable::new();
            let concept = table.add_type("ConceptNode", NODE);
            let list = table.add_type("ListLink", LINK);
            let root = table.add(NewAtom::node(concept, "root")).unwrap();
            let mut previous = root;
            for i in 0..len {
                let leaf = table.add(NewAtom::node(concept, format!("n{i}"))).unwrap();
                previous = table.add(NewAtom::link(list, [previous, leaf])).unwrap();
            }
            (table, root)
        },
        |(table, root)| {
            table.remove(root, true);
        },
        BatchSize::SmallInput,
    );
}

fn decay_sweep(b: &mut Bencher<'_>, len: usize) {
    b.iter_batched(
        || {
            let table = AtomTable::new();
            let concept = table.add_type("ConceptNode", NODE);
            let handles: Vec<_> = (0..len)
                .map(|i| table.add(NewAtom::node(concept, format!("n{i}"))).unwrap())
                .collect();
            for &h in &handles {
                table.set_decayed(h, true).unwrap();
            }
            table
        },
        |table| {
            table.purge_decayed();
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

pub fn bench_removal(c: &mut Criterion) {
    bench_fn(c, "removal/leaf", leaf_removal);
    bench_fn(c, "removal/recursive_chain", recursive_chain_removal);
    bench_fn(c, "removal/decay_sweep", decay_sweep);
}
