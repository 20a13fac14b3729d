//! Time-boxed caching.

use std::time::Duration;

use crate::DateTime;

/// Single-value cache whose content outlives a refresh by a fixed
/// time-to-live only.
///
/// The current moment is always provided by the caller, so the cell behaves
/// deterministically and never consults the system clock on its own.
#[derive(Clone, Debug)]
pub struct TtlCache<T> {
    /// Cached value along with the [`DateTime`] it was refreshed at.
    slot: Option<(T, DateTime)>,

    /// Time-to-live of the cached value.
    ttl: Duration,
}

impl<T> TtlCache<T> {
    /// Creates a new empty [`TtlCache`] with the provided time-to-live.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    /// Returns the cached value, unless it has outlived its time-to-live by
    /// the provided moment.
    ///
    /// An expired value is a miss, indistinguishable from an empty cell.
    #[must_use]
    pub fn get(&self, now: DateTime) -> Option<&T> {
        self.slot.as_ref().and_then(|(value, refreshed_at)| {
            (now < *refreshed_at + self.ttl).then_some(value)
        })
    }

    /// Replaces the cached value, restarting its time-to-live from the
    /// provided moment.
    pub fn refresh(&mut self, value: T, now: DateTime) {
        self.slot = Some((value, now));
    }

    /// Drops the cached value, if any.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::{DateTime, TtlCache};

    #[test]
    fn misses_when_empty() {
        let cache = TtlCache::<u32>::new(Duration::from_secs(60));

        assert_eq!(cache.get(DateTime::UNIX_EPOCH), None);
    }

    #[test]
    fn hits_within_ttl_and_misses_after() {
        let refreshed_at = DateTime::UNIX_EPOCH;
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.refresh(7, refreshed_at);

        assert_eq!(cache.get(refreshed_at), Some(&7));
        assert_eq!(
            cache.get(refreshed_at + Duration::from_secs(59)),
            Some(&7),
        );
        assert_eq!(cache.get(refreshed_at + Duration::from_secs(60)), None);
        assert_eq!(cache.get(refreshed_at + Duration::from_secs(61)), None);
    }

    #[test]
    fn refresh_restarts_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.refresh(1, DateTime::UNIX_EPOCH);

        let later = DateTime::UNIX_EPOCH + Duration::from_secs(300);
        cache.refresh(2, later);

        assert_eq!(cache.get(later + Duration::from_secs(30)), Some(&2));
    }

    #[test]
    fn invalidate_drops_value() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.refresh(7, DateTime::UNIX_EPOCH);
        cache.invalidate();

        assert_eq!(cache.get(DateTime::UNIX_EPOCH), None);
    }
}
