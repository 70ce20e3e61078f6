//! Time-bounded read-through cache
//!
//! Each catalog owns one [`TimedCache`]. A read inside the validity window
//! returns the previous snapshot without touching the filesystem; a read
//! outside it runs the refresh closure and replaces the snapshot wholesale.
//!
//! The mutex is held across the whole check-refresh-replace sequence, so
//! concurrent callers serialize and never see a half-built result.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// How long a refreshed snapshot stays valid
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of "now" for cache freshness checks
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

struct CacheState<T> {
    entries: Arc<[T]>,
    last_refreshed: SystemTime,
}

/// A snapshot of `T` values that is rebuilt at most once per TTL
pub struct TimedCache<T> {
    state: Mutex<CacheState<T>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T> TimedCache<T> {
    /// Create an empty cache using [`CACHE_TTL`]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, CACHE_TTL)
    }

    /// Create an empty cache with a custom validity window
    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: Arc::from(Vec::new()),
                last_refreshed: UNIX_EPOCH,
            }),
            ttl,
            clock,
        }
    }

    /// Return the cached snapshot, or rebuild it with `refresh` if stale
    ///
    /// Whatever `refresh` returns is stored, including an empty list, so a
    /// failing source is retried once per window rather than on every call.
    pub fn get_or_refresh<F>(&self, refresh: F) -> Arc<[T]>
    where
        F: FnOnce() -> Vec<T>,
    {
        let mut state = self.state.lock();
        let now = self.clock.now();

        if self.is_fresh(state.last_refreshed, now) {
            tracing::trace!("cache hit ({} entries)", state.entries.len());
            return Arc::clone(&state.entries);
        }

        state.entries = Arc::from(refresh());
        state.last_refreshed = now;
        Arc::clone(&state.entries)
    }

    /// Drop the snapshot and force the next read to rebuild it
    pub fn invalidate(&self) {
        let mut state = self.state.lock();
        state.entries = Arc::from(Vec::new());
        state.last_refreshed = UNIX_EPOCH;
    }

    /// When the snapshot was last rebuilt (`UNIX_EPOCH` if never)
    pub fn last_refreshed(&self) -> SystemTime {
        self.state.lock().last_refreshed
    }

    fn is_fresh(&self, last_refreshed: SystemTime, now: SystemTime) -> bool {
        if last_refreshed == UNIX_EPOCH {
            return false;
        }
        // A clock that moved backwards counts as stale
        match now.duration_since(last_refreshed) {
            Ok(age) => age < self.ttl,
            Err(_) => false,
        }
    }
}
