//! Usage statistics for a client instance.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time read of the client's request counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Calls that missed the cache and went to the network.
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Calls answered from the cache. Not included in `total_requests`.
    pub cached_responses: u64,
    pub tokens_used: u64,
    pub cache_size: usize,
    /// `cached / total` as a percentage with two decimals, or `"0%"`.
    pub cache_hit_rate: String,
}

impl StatsSnapshot {
    /// Raw `cached_responses / total_requests`, 0 when nothing was requested.
    pub fn hit_ratio(&self) -> f64 {
        hit_ratio(self.cached_responses, self.total_requests)
    }
}

fn hit_ratio(cached: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        cached as f64 / total as f64
    }
}

fn format_hit_rate(cached: u64, total: u64) -> String {
    if total == 0 {
        "0%".to_string()
    } else {
        format!("{:.2}%", hit_ratio(cached, total) * 100.0)
    }
}

/// Lock-free counters owned by one client.
#[derive(Debug, Default)]
pub struct UsageStats {
    total: AtomicU64,
    successful: AtomicU64,
    failed: AtomicU64,
    cached: AtomicU64,
    tokens: AtomicU64,
}

impl UsageStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successful.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cached.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tokens(&self, n: u64) {
        self.tokens.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self, cache_size: usize) -> StatsSnapshot {
        let total = self.total.load(Ordering::Relaxed);
        let cached = self.cached.load(Ordering::Relaxed);
        StatsSnapshot {
            total_requests: total,
            successful_requests: self.successful.load(Ordering::Relaxed),
            failed_requests: self.failed.load(Ordering::Relaxed),
            cached_responses: cached,
            tokens_used: self.tokens.load(Ordering::Relaxed),
            cache_size,
            cache_hit_rate: format_hit_rate(cached, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_report_zero_percent() {
        let snap = UsageStats::new().snapshot(0);
        assert_eq!(snap.cache_hit_rate, "0%");
        assert_eq!(snap.hit_ratio(), 0.0);
    }

    #[test]
    fn hit_rate_uses_two_decimals() {
        let stats = UsageStats::new();
        for _ in 0..3 {
            stats.record_request();
            stats.record_success();
        }
        stats.record_cache_hit();

        let snap = stats.snapshot(3);
        assert_eq!(snap.total_requests, 3);
        assert_eq!(snap.successful_requests, 3);
        assert_eq!(snap.cached_responses, 1);
        assert_eq!(snap.cache_size, 3);
        assert_eq!(snap.cache_hit_rate, "33.33%");
    }

    #[test]
    fn hit_rate_can_exceed_one_hundred_percent() {
        let stats = UsageStats::new();
        stats.record_request();
        stats.record_cache_hit();
        stats.record_cache_hit();
        assert_eq!(stats.snapshot(1).cache_hit_rate, "200.00%");
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let json = serde_json::to_value(UsageStats::new().snapshot(0)).unwrap();
        assert_eq!(json["totalRequests"], 0);
        assert_eq!(json["cacheHitRate"], "0%");
    }
}
