use criterion::{
    AxisScale, BatchSize, Bencher, BenchmarkId, Criterion, PlotConfiguration, Throughput,
};

use atomtable::{AtomTable, NewAtom, OutgoingSlot, LINK, NODE};

use super::ITEM_COUNTS;

const SAMPLE_SIZE: usize = 10;

fn exact_lookup(b: &mut Bencher<'_>, len: usize) {
    b.iter_batched(
        || {
            let table = AtomTable::new();
            let concept = table.add_type("ConceptNode", NODE);
            for i in 0..len {
                table.add(NewAtom::node(concept, format!("n{i}"))).unwrap();
            }
            (table, concept)
        },
        |(table, concept)| {
            for i in 0..len {
                table.get_by_name_type(concept, &format!("n{i}"));
            }
        },
        BatchSize::SmallInput,
    );
}

fn get_by_type_with_subclass(b: &mut Bencher<'_>, len: usize) {
    b.iter_batched(
        || {
            let table = AtomTable::new();
            let concept = table.add_type("ConceptNode", NODE);
            let predicate = table.add_type("PredicateNode", concept);
            for i in 0..len {
                table.add(NewAtom::node(predicate, format!("n{i}"))).unwrap();
            }
            (table, concept)
        },
        |(table, concept)| {
            table.get_by_type(concept, true);
        },
        BatchSize::SmallInput,
    );
}

fn compound_positional_query(b: &mut Bencher<'_>, len: usize) {
    b.iter_batched(
        || {
            let table = AtomTable::new();
            let concept = table.add_type("ConceptNode", NODE);
            let predicate = table.add_type("PredicateNode", NODE);
            let eval = table.add_type("EvaluationLink", LINK);
            let head = table.add(NewAtom::node(predicate, "head")).unwrap();
            for i in 0..len {
                let tail = table.add(NewAtom::node(concept, format!("n{i}"))).unwrap();
                table.add(NewAtom::link(eval, [head, tail])).unwrap();
            }
            (table, concept, eval, head)
        },
        |(table, concept, eval, head)| {
            let slots = [
                OutgoingSlot::Handle(head),
                OutgoingSlot::Type {
                    type_id: concept,
                    subclass: false,
                },
            ];
            table.get_by_outgoing(&slots, eval, false, None).unwrap();
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

pub fn bench_query(c: &mut Criterion) {
    bench_fn(c, "query/exact_lookup", exact_lookup);
    bench_fn(c, "query/by_type_subclass", get_by_type_with_subclass);
    bench_fn(c, "query/compound_positional", compound_positional_query);
}
