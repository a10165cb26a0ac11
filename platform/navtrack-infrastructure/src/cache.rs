use navtrack_domain::repositories::record_source::{LoadError, RecordSource};
use navtrack_domain::value_objects::daily_record::DailyRecord;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    fetched_at: Instant,
    records: Vec<DailyRecord>,
}

/// Time-bounded cache in front of another [`RecordSource`], keyed by location.
///
/// Results may be up to `ttl` stale. Only successful loads are stored, so a
/// failed fetch is retried on the next call. A zero TTL disables caching.
pub struct CachedRecordSource<S, C = SystemClock> {
    inner: S,
    ttl: Duration,
    clock: C,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<S: RecordSource> CachedRecordSource<S, SystemClock> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self::with_clock(inner, ttl, SystemClock)
    }
}

impl<S: RecordSource, C: Clock> CachedRecordSource<S, C> {
    pub fn with_clock(inner: S, ttl: Duration, clock: C) -> Self {
        Self {
            inner,
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn invalidate(&self, location: &str) -> bool {
        self.entries.lock().remove(location).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn cached(&self, location: &str, now: Instant) -> Option<Vec<DailyRecord>> {
        let mut entries = self.entries.lock();
        let fresh = entries
            .get(location)
            .map(|entry| now.saturating_duration_since(entry.fetched_at) < self.ttl)?;
        if fresh {
            entries.get(location).map(|entry| entry.records.clone())
        } else {
            entries.remove(location);
            None
        }
    }
}

impl<S: RecordSource, C: Clock> RecordSource for CachedRecordSource<S, C> {
    fn load_records(&self, location: &str) -> Result<Vec<DailyRecord>, LoadError> {
        let location = location.trim();
        if self.ttl.is_zero() {
            return self.inner.load_records(location);
        }

        let now = self.clock.now();
        if let Some(records) = self.cached(location, now) {
            metrics::counter!("navtrack.source.cache_hits_total").increment(1);
            tracing::debug!(location, "track record cache hit");
            return Ok(records);
        }

        metrics::counter!("navtrack.source.cache_misses_total").increment(1);
        tracing::debug!(location, ttl_secs = self.ttl.as_secs(), "track record cache miss");
        let records = self.inner.load_records(location)?;
        // The lock is not held across the fetch; concurrent misses both fetch
        // and the last writer wins.
        self.entries.lock().insert(
            location.to_string(),
            CacheEntry {
                fetched_at: now,
                records: records.clone(),
            },
        );
        Ok(records)
    }
}
