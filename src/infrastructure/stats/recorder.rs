use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::stats::StatsSnapshot;

/// Lock-free hit/miss counters shared by all requests of one cache instance
#[derive(Debug, Default)]
pub struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_starts_at_zero() {
        let snapshot = StatsRecorder::new().snapshot();

        assert_eq!(snapshot, StatsSnapshot::default());
        assert_eq!(snapshot.hit_rate(), 0.0);
    }

    #[test]
    fn test_records_hits_and_misses() {
        let recorder = StatsRecorder::new();

        recorder.record_hit();
        recorder.record_hit();
        recorder.record_miss();

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.hits, 2);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.total(), 3);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let recorder = Arc::new(StatsRecorder::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let recorder = recorder.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        if i % 2 == 0 {
                            recorder.record_hit();
                        } else {
                            recorder.record_miss();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.hits, 4000);
        assert_eq!(snapshot.misses, 4000);
    }
}
