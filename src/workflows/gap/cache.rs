use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use super::provider::GapKeywordResponse;

/// Time source injected into the cache so tests can drive expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cache key over normalized inputs. The key space is small (competitor
/// count times locale), so the cache carries no size bound.
pub fn cache_key(
    brand_domain: &str,
    competitor_domain: &str,
    location_code: u32,
    language_name: &str,
) -> String {
    format!(
        "{brand_domain}|{competitor_domain}|{location_code}|{}",
        language_name.to_lowercase()
    )
}

struct CacheEntry {
    payload: GapKeywordResponse,
    fetched_at: DateTime<Utc>,
}

/// TTL memoization of provider responses. Entries older than the TTL are
/// evicted on read; `set` overwrites unconditionally.
pub struct GapCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl GapCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(Duration::hours(24), clock)
    }

    pub fn with_ttl(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn get(&self, key: &str) -> Option<GapKeywordResponse> {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = self.clock.now();
        match entries.get(key) {
            Some(entry) if now - entry.fetched_at <= self.ttl => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, key: &str, payload: GapKeywordResponse) {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let fetched_at = self.clock.now();
        entries.insert(
            key.to_string(),
            CacheEntry {
                payload,
                fetched_at,
            },
        );
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Fixed-epoch clock advanced manually by tests.
    pub(crate) struct ManualClock {
        offset_secs: AtomicI64,
    }

    impl ManualClock {
        pub(crate) fn new() -> Self {
            Self {
                offset_secs: AtomicI64::new(0),
            }
        }

        pub(crate) fn advance_hours(&self, hours: i64) {
            self.offset_secs.fetch_add(hours * 3600, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0)
                .expect("valid fixed epoch");
            base + Duration::seconds(self.offset_secs.load(Ordering::SeqCst))
        }
    }

    fn payload() -> GapKeywordResponse {
        GapKeywordResponse {
            brand_domain: "brand.com".to_string(),
            competitor_domain: "rival.com".to_string(),
            gap_keywords: Vec::new(),
            total_count: 0,
        }
    }

    #[test]
    fn round_trips_within_the_ttl() {
        let clock = Arc::new(ManualClock::new());
        let cache = GapCache::new(clock.clone());
        let key = cache_key("brand.com", "rival.com", 2840, "English");

        cache.set(&key, payload());
        clock.advance_hours(23);
        assert_eq!(cache.get(&key), Some(payload()));
    }

    #[test]
    fn entries_expire_after_twenty_four_hours() {
        let clock = Arc::new(ManualClock::new());
        let cache = GapCache::new(clock.clone());
        let key = cache_key("brand.com", "rival.com", 2840, "English");

        cache.set(&key, payload());
        clock.advance_hours(25);
        assert_eq!(cache.get(&key), None);
        // The stale entry was evicted, not just skipped.
        clock.advance_hours(-25);
        assert_eq!(cache.get(&key), None);
    }

    #[test]
    fn set_overwrites_and_clear_empties() {
        let clock = Arc::new(ManualClock::new());
        let cache = GapCache::new(clock);
        let key = cache_key("brand.com", "rival.com", 2840, "English");

        cache.set(&key, payload());
        let mut newer = payload();
        newer.total_count = 7;
        cache.set(&key, newer.clone());
        assert_eq!(cache.get(&key), Some(newer));

        cache.clear();
        assert_eq!(cache.get(&key), None);
    }

    #[test]
    fn keys_are_locale_scoped() {
        let clock = Arc::new(ManualClock::new());
        let cache = GapCache::new(clock);
        cache.set(&cache_key("brand.com", "rival.com", 2840, "English"), payload());
        assert_eq!(
            cache.get(&cache_key("brand.com", "rival.com", 2826, "English")),
            None
        );
    }
}
