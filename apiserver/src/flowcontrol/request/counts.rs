use dashmap::DashMap;
use shared::api::RequestInfo;

/// Approximate number of stored objects per group resource key.
///
/// Counts may be stale, 0 means unknown.
pub trait ObjectCountSource: Send + Sync {
    fn object_count(&self, key: &str) -> i64;
}

/// Approximate number of watchers that would observe a change made by the request.
pub trait WatchCountSource: Send + Sync {
    fn watch_count(&self, info: &RequestInfo) -> u64;
}

impl<F> ObjectCountSource for F
where
    F: Fn(&str) -> i64 + Send + Sync,
{
    fn object_count(&self, key: &str) -> i64 {
        self(key)
    }
}

impl<F> WatchCountSource for F
where
    F: Fn(&RequestInfo) -> u64 + Send + Sync,
{
    fn watch_count(&self, info: &RequestInfo) -> u64 {
        self(info)
    }
}

impl ObjectCountSource for DashMap<String, i64> {
    fn object_count(&self, key: &str) -> i64 {
        self.get(key).map(|count| *count).unwrap_or(0)
    }
}
