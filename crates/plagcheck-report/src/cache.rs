use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::report::Report;

/// Default LRU capacity.
pub const DEFAULT_CAPACITY: usize = 64;

struct Entry {
    report: Arc<Report>,
    inserted_at: Instant,
}

/// Bounded, process-local LRU of built reports keyed by `report_id`.
///
/// A single `Mutex` guards the LRU's own bookkeeping (insert, touch,
/// evict) — fragment memoization happens behind each `Report`'s own
/// per-pair locks, never this one, so materializing fragments for one
/// report can't block a lookup of another. There is no implicit
/// process-global mutable singleton: the facade owns this cache and
/// takes it as a constructor dependency, so tests can inject a fresh
/// one rather than reaching for a process-wide map.
pub struct ReportCache {
    inner: Mutex<LruCache<String, Entry>>,
    ttl: Option<Duration>,
}

impl ReportCache {
    /// `capacity` of 0 falls back to `DEFAULT_CAPACITY` rather than
    /// constructing a cache that can hold nothing.
    pub fn new(capacity: usize) -> Self {
        Self::with_ttl(capacity, None)
    }

    pub fn with_ttl(capacity: usize, ttl: Option<Duration>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or_else(|| {
            NonZeroUsize::new(DEFAULT_CAPACITY).expect("DEFAULT_CAPACITY is nonzero")
        });
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Insert (or replace) a report, keyed by its own `report_id`.
    pub fn insert(&self, report: Arc<Report>) {
        let mut lru = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        let key = report.report_id().to_string();
        lru.put(
            key,
            Entry {
                report,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Look up a report by id, touching its LRU recency. Returns `None`
    /// if absent or expired; an expired entry is evicted on the way
    /// out so it doesn't linger past its TTL.
    pub fn get(&self, report_id: &str) -> Option<Arc<Report>> {
        let mut lru = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        let expired = match (lru.peek(report_id), self.ttl) {
            (Some(entry), Some(ttl)) => entry.inserted_at.elapsed() > ttl,
            _ => false,
        };
        if expired {
            lru.pop(report_id);
            return None;
        }
        lru.get(report_id).map(|entry| Arc::clone(&entry.report))
    }

    /// Explicitly evict a report, e.g. on caller-driven invalidation.
    pub fn remove(&self, report_id: &str) -> bool {
        let mut lru = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        lru.pop(report_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
