//! The optional statistics-monitor collaborator (§6).

use crate::atom::Atom;

/// Hooks invoked around atom insertion and removal.
///
/// The original routes every add/remove through a process-wide
/// `StatisticsMonitor::getInstance()` singleton. Per the design notes
/// ("replace the global statistics singleton with an injected collaborator
/// per table"), the crate instead takes an `Option<Arc<dyn StatisticsMonitor>>`
/// at table construction; when `None`, [`AtomTable::uses_statistics`]
/// reports `false` and the hooks are simply never called.
///
/// [`AtomTable::uses_statistics`]: crate::table::AtomTable::uses_statistics
pub trait StatisticsMonitor: Send + Sync {
    /// Called once an atom has been fully inserted and is live.
    fn on_add(&self, atom: &Atom);

    /// Called once an atom has been fully removed from every index.
    fn on_remove(&self, atom: &Atom);
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::StatisticsMonitor;
    use crate::atom::Atom;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    pub(crate) struct CountingMonitor {
        pub adds: AtomicUsize,
        pub removes: AtomicUsize,
    }

    impl StatisticsMonitor for CountingMonitor {
        fn on_add(&self, _atom: &Atom) {
            self.adds.fetch_add(1, Ordering::SeqCst);
        }

        fn on_remove(&self, _atom: &Atom) {
            self.removes.fetch_add(1, Ordering::SeqCst);
        }
    }
}
