use std::time::Instant;
use tracing::{info, warn};

/// Step-by-step reporting hooks for a sync run. `()` ignores everything.
pub trait SyncProgress: Send + Sync {
    /// A number-one movie is being looked up. `index` is 1-based.
    fn movie_started(&self, _index: usize, _total: usize, _title: &str) {}

    /// The lookup phase is over.
    fn movies_finished(&self, _eligible: usize) {}

    /// A list is about to be rewritten. `index` is 1-based.
    fn list_started(&self, _index: usize, _total: usize, _name: &str) {}

    fn lists_finished(&self) {}
}

impl SyncProgress for () {}

/// Tally of list writes for the end-of-phase summary
pub struct ProgressTracker {
    total: usize,
    written: usize,
    failed: usize,
    skipped: usize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            written: 0,
            failed: 0,
            skipped: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_written(&mut self) {
        self.written += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Logs at WARN when anything failed, INFO otherwise.
    pub fn log_summary(&self, operation_name: &str) {
        let elapsed = self.start_time.elapsed();
        if self.failed > 0 {
            warn!(
                "{} completed: {} total in {:.1}s | Written: {} | Failed: {} | Skipped: {}",
                operation_name,
                self.total,
                elapsed.as_secs_f64(),
                self.written,
                self.failed,
                self.skipped
            );
        } else {
            info!(
                "{} completed: {} total in {:.1}s | Written: {} | Failed: {} | Skipped: {}",
                operation_name,
                self.total,
                elapsed.as_secs_f64(),
                self.written,
                self.failed,
                self.skipped
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_counts() {
        let mut tracker = ProgressTracker::new(4);
        tracker.record_written();
        tracker.record_written();
        tracker.record_failed();
        tracker.record_skipped();
        assert_eq!((tracker.written(), tracker.failed(), tracker.skipped()), (2, 1, 1));
        tracker.log_summary("List write");
    }
}
