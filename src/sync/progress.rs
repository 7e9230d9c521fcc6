use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared progress state for one rebuild or download pass.
///
/// The unit total is fixed at construction and never changes while the pass
/// is in flight; only the completed counter moves.
#[derive(Debug)]
pub struct PassProgress {
    total: usize,
    completed: AtomicUsize,
}

impl PassProgress {
    pub fn new(total: usize) -> PassProgress {
        PassProgress {
            total,
            completed: AtomicUsize::new(0),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Record one finished unit, successful or not, and return the overall
    /// percentage after it.
    pub fn record_unit(&self) -> f64 {
        let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        if self.total == 0 {
            return 100.0;
        }
        done as f64 / self.total as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total
    }
}
