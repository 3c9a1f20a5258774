pub mod insertion;
pub mod query;
pub mod removal;

pub(super) const ITEM_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];
