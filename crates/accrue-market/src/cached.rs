//! Memoizing wrapper around a rate environment.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::trace;

use accrue_core::{AccrueResult, Date, IndexId, RateEnvironment};

/// Caches successful lookups of an inner environment.
///
/// Failed lookups are not cached, so the error is reported again on every
/// call. Safe to share across threads during a valuation pass.
#[derive(Debug)]
pub struct CachedEnvironment<E> {
    inner: E,
    cache: DashMap<(IndexId, Date), f64>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<E: RateEnvironment> CachedEnvironment<E> {
    /// Wraps an environment.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the wrapped environment.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups forwarded to the inner environment.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of cached rates.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops all cached rates and resets the counters.
    pub fn clear(&self) {
        self.cache.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl<E: RateEnvironment> RateEnvironment for CachedEnvironment<E> {
    fn forward_rate(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64> {
        let key = (index.clone(), fixing_date);
        if let Some(rate) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(*rate);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let rate = self.inner.forward_rate(index, fixing_date)?;
        trace!(index = %index, date = %fixing_date, rate, "caching rate");
        self.cache.insert(key, rate);
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use accrue_core::AccrueError;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    struct Counting {
        calls: AtomicU64,
    }

    impl RateEnvironment for Counting {
        fn forward_rate(&self, index: &IndexId, fixing_date: Date) -> AccrueResult<f64> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if fixing_date.day() == 13 {
                return Err(AccrueError::missing_market_data(index, fixing_date, "unlucky"));
            }
            Ok(0.05)
        }
    }

    fn counting() -> CachedEnvironment<Counting> {
        CachedEnvironment::new(Counting {
            calls: AtomicU64::new(0),
        })
    }

    #[test]
    fn test_repeated_lookup_hits_cache() {
        let env = counting();
        let index = IndexId::new("USD-SOFR");

        assert_eq!(env.forward_rate(&index, date(2024, 2, 1)), Ok(0.05));
        assert_eq!(env.forward_rate(&index, date(2024, 2, 1)), Ok(0.05));

        assert_eq!(env.inner().calls.load(Ordering::Relaxed), 1);
        assert_eq!(env.hits(), 1);
        assert_eq!(env.misses(), 1);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let env = counting();
        let index = IndexId::new("USD-SOFR");

        assert!(env.forward_rate(&index, date(2024, 2, 13)).is_err());
        assert!(env.forward_rate(&index, date(2024, 2, 13)).is_err());

        assert_eq!(env.inner().calls.load(Ordering::Relaxed), 2);
        assert!(env.is_empty());
    }

    #[test]
    fn test_clear() {
        let env = counting();
        let index = IndexId::new("USD-SOFR");
        env.forward_rate(&index, date(2024, 2, 1)).unwrap();
        env.clear();
        assert!(env.is_empty());
        assert_eq!(env.misses(), 0);
    }

    #[test]
    fn test_concurrent_readers() {
        let env = Arc::new(counting());
        let index = IndexId::new("USD-SOFR");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let env = Arc::clone(&env);
                let index = index.clone();
                thread::spawn(move || {
                    for day in 1..=10 {
                        assert_eq!(env.forward_rate(&index, date(2024, 3, day)), Ok(0.05));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(env.len(), 10);
        assert_eq!(env.hits() + env.misses(), 40);
    }
}
